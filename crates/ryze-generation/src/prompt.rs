// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt construction for create and refine turns.

/// Fixed style and format directive sent at system level on every call.
pub const SYSTEM_INSTRUCTION: &str = r#"
Voe como o arquiteto líder da Stripe/Apple. Gere apenas HTML+Tailwind puro.
REQ_DESIGN:
- Estética: "Linear.app style", clean, high-contrast, dark/light mode savvy.
- UI: Bento Grids, glassmorphism (backdrop-blur-md, white/10 border), shadows profundas.
- Animações: Tailwind 'animate-in fade-in slide-in-from-bottom-4 duration-700'.
- Spacing: py-24 a py-32 para seções. Nunca aperte o conteúdo.
REQ_TECH:
- Ícones: Lucide (CDN: https://unpkg.com/lucide@latest). SEMPRE rode <script>lucide.createIcons();</script> no fim.
- Fontes: Google Fonts 'Inter' ou 'Plus Jakarta Sans'.
- Imagens: Unsplash URLs profissionais (resolução 1200x800+).
REQ_COPY:
- Elite: Copy em PT-BR focada em conversão (Headline -> Sub -> Benefícios -> CTA).
- Sem placeholders: Invente nomes e dados profissionais coerentes com o nicho.
OUTPUT:
- APENAS CÓDIGO BRUTO. SEM CONVERSA. SEM MARKDOWN.
- Comece com <!DOCTYPE html> se for site completo ou <div se for componente.
"#;

/// Builds the turn prompt.
///
/// With a prior artifact the prompt is an edit instruction that embeds the
/// previous document verbatim; otherwise it asks for a page from scratch.
pub fn build_prompt(description: &str, prior_artifact: Option<&str>) -> String {
    match prior_artifact {
        Some(prior) => format!(
            "RYZE_REFINE: Atualize este código. REQ: \"{description}\". CODE: {prior}. \
             Mantenha a estrutura, mude apenas o solicitado."
        ),
        None => format!(
            "RYZE_CREATE: Crie do zero um(a) {description}. \
             Deve ser visualmente impactante e pronto para conversão."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_prompt_frames_from_scratch() {
        let prompt = build_prompt("landing page for a bakery", None);
        assert_eq!(
            prompt,
            "RYZE_CREATE: Crie do zero um(a) landing page for a bakery. \
             Deve ser visualmente impactante e pronto para conversão."
        );
    }

    #[test]
    fn refine_prompt_embeds_prior_verbatim() {
        let prior = "<button class=\"bg-red-500\">Comprar</button>";
        let prompt = build_prompt("change the button color to green", Some(prior));
        assert!(prompt.starts_with("RYZE_REFINE: "));
        assert!(prompt.contains("REQ: \"change the button color to green\""));
        assert!(prompt.contains(&format!("CODE: {prior}.")));
        assert!(prompt.ends_with("Mantenha a estrutura, mude apenas o solicitado."));
    }

    #[test]
    fn system_instruction_demands_raw_markup() {
        assert!(SYSTEM_INSTRUCTION.contains("SEM MARKDOWN"));
        assert!(SYSTEM_INSTRUCTION.contains("PT-BR"));
        assert!(SYSTEM_INSTRUCTION.contains("https://unpkg.com/lucide@latest"));
    }
}
