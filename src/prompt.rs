//! The prompt users paste into a chat assistant so that its answer comes back
//! in a shape [crate::parse] accepts.

use serde::{Deserialize, Serialize};

use crate::delimiter::Delimiter;

const PROMPT_TEMPLATE: &str = r#"
A partir de agora e durante toda essa conversa atue como um Especialista em Aprendizagem e Flashcards (Anki).
Seu objetivo é converter o texto que eu enviar em flashcards otimizados para memorização ativa e repetição espaçada.

REGRAS DE FORMATAÇÃO (CRÍTICO):
1. A saída deve ser exclusivamente um bloco de código (tabela).
2. O formato de saída deve ser compatível com importação CSV.
3. O delimitador de colunas DEVE ser o {{DELIMITADOR}}.
4. **IMPORTANTE:** Se a coluna "Tags" for incluída, as tags individuais dentro dessa coluna devem ser separadas por **espaço** ou **vírgula** (ex: Tag1,Tag2 ou Tag1 Tag2).
5. Não utilize ";" a não ser que seja o {{DELIMITADOR}}.

FORMATO:
{{FORMATO_FINAL}}

INSTRUÇÃO DE GERAÇÃO:
* O formato das questões deve ser: {{MODELO_DE_CARD}}.
* Que consiste em: {{EXPLICACAO_MODELO}}
* {{INSTRUCAO_ESPECIFICA_CLOZE}}
* Se houver necessidade de usar o delimitador dentro das perguntas ou respostas, utilize o caractere de escape: "\{{DELIMITADOR}}" antes dele.
* Gere os flashcards em Português Brasileiro

CONTEÚDO:
Se não for instruído quantos flashcards devem ser gerados, garanta que há flashcards suficientes para abordar o ponto central do conteúdo (mínimo 5).



[COLE SEU MATERIAL AQUI]
"#;

/// Kind of card the assistant is asked to write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardStyle {
    #[default]
    #[serde(rename = "Básico")]
    Basic,
    #[serde(rename = "Invertido")]
    Reversed,
    #[serde(rename = "Escrita")]
    Typed,
    #[serde(rename = "Ocultação (Cloze)")]
    Cloze,
}

impl CardStyle {
    pub const ALL: [CardStyle; 4] = [Self::Basic, Self::Reversed, Self::Typed, Self::Cloze];

    pub fn name(self) -> &'static str {
        match self {
            Self::Basic => "Básico",
            Self::Reversed => "Invertido",
            Self::Typed => "Escrita",
            Self::Cloze => "Ocultação (Cloze)",
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            Self::Basic => "Formato simples de Pergunta;Resposta (Frente;Verso).",
            Self::Reversed => "Formato de Pergunta;Resposta, mas a IA deve criar questões que funcionem bem se as cartas forem invertidas (Verso;Frente).",
            Self::Typed => "Formato de Pergunta;Resposta, onde a \"Resposta\" deve ser uma palavra ou frase concisa para digitação.",
            Self::Cloze => "A IA deve usar a sintaxe do Anki para ocultação de palavras: \"Texto com {{c1::palavra oculta}}\". O formato final deve ser: Texto com Ocultação{{DELIMITADOR}}Verso Extra{{DELIMITADOR}}Tags.",
        }
    }

    /// Column headers of the expected output, without tags.
    fn columns(self) -> [&'static str; 2] {
        match self {
            Self::Cloze => ["Texto com Ocultação", "Verso Extra"],
            _ => ["Frente", "Verso"],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptOptions {
    pub card_style: CardStyle,
    pub delimiter: Delimiter,
    pub include_tags: bool,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            card_style: CardStyle::Basic,
            delimiter: Delimiter::Semicolon,
            include_tags: true,
        }
    }
}

/// Fills the prompt template for `options`. Every placeholder is replaced.
pub fn build_prompt(options: &PromptOptions) -> String {
    let d = options.delimiter.token();

    let mut columns = options.card_style.columns().to_vec();
    if options.include_tags {
        columns.push("Tags (Opcional)");
    }
    let final_format = format!("{}\n[... Mais linhas]", columns.join(d));

    let cloze_instruction = match options.card_style {
        CardStyle::Cloze => format!(
            "Para o modelo de Ocultação, use o formato: Texto com {}{d}Verso Extra{d}[Tags].",
            "{{c1::cloze}}"
        ),
        _ => String::new(),
    };

    // the explanation may carry the delimiter placeholder, so it goes in first
    PROMPT_TEMPLATE
        .replace("{{FORMATO_FINAL}}", &final_format)
        .replace("{{MODELO_DE_CARD}}", options.card_style.name())
        .replace("{{EXPLICACAO_MODELO}}", options.card_style.explanation())
        .replace("{{INSTRUCAO_ESPECIFICA_CLOZE}}", &cloze_instruction)
        .replace("\\{{DELIMITADOR}}", &format!("\\{d}"))
        .replace("{{DELIMITADOR}}", d)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_placeholder_survives() {
        for card_style in CardStyle::ALL {
            for delimiter in Delimiter::ALL {
                for include_tags in [true, false] {
                    let prompt = build_prompt(&PromptOptions {
                        card_style,
                        delimiter,
                        include_tags,
                    });
                    for placeholder in [
                        "{{DELIMITADOR}}",
                        "{{FORMATO_FINAL}}",
                        "{{MODELO_DE_CARD}}",
                        "{{EXPLICACAO_MODELO}}",
                        "{{INSTRUCAO_ESPECIFICA_CLOZE}}",
                    ] {
                        assert!(!prompt.contains(placeholder), "{placeholder} left in prompt");
                    }
                    assert!(prompt.starts_with("A partir de agora"));
                    assert!(prompt.ends_with("[COLE SEU MATERIAL AQUI]"));
                }
            }
        }
    }

    #[test]
    fn basic_with_pipe_and_tags() {
        let prompt = build_prompt(&PromptOptions {
            card_style: CardStyle::Basic,
            delimiter: Delimiter::Pipe,
            include_tags: true,
        });
        assert!(prompt.contains("Frente|Verso|Tags (Opcional)\n[... Mais linhas]"));
        assert!(prompt.contains("DEVE ser o |."));
        assert!(prompt.contains("caractere de escape: \"\\|\" antes dele"));
        assert!(prompt.contains("O formato das questões deve ser: Básico."));
        assert!(!prompt.contains("Para o modelo de Ocultação"));
    }

    #[test]
    fn cloze_without_tags() {
        let prompt = build_prompt(&PromptOptions {
            card_style: CardStyle::Cloze,
            delimiter: Delimiter::DoubleSlash,
            include_tags: false,
        });
        assert!(prompt.contains("Texto com Ocultação//Verso Extra\n[... Mais linhas]"));
        assert!(prompt.contains("Texto com {{c1::cloze}}//Verso Extra//[Tags]."));
        assert!(prompt.contains("Texto com Ocultação//Verso Extra//Tags."));
        assert!(prompt.contains("{{c1::palavra oculta}}"));
    }

    #[test]
    fn style_names_serialize_as_shown() {
        let json = serde_json::to_string(&CardStyle::Cloze).unwrap();
        assert_eq!(json, "\"Ocultação (Cloze)\"");
    }
}
