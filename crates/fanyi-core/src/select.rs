use fanyi_lang::contains_cjk;
use fanyi_types::{Engine, EngineDecision, EngineMode};

/// Pick the backend for a request.
///
/// Forced modes short-circuit. In automatic mode a lightness heuristic
/// applies: short simple fragments are well served by the fast
/// dictionary-style lookup, while phrase-level input goes to the generative
/// engine, which phrases holistically but costs more. CJK input is judged
/// by character count since it has no whitespace-delimited words.
///
/// Callers guarantee the text is trimmed and non-empty.
pub fn decide(text: &str, mode: &EngineMode, default_model: &str) -> EngineDecision {
    match mode {
        EngineMode::ForceGoogle => EngineDecision {
            engine: Engine::Google,
            model: None,
        },
        EngineMode::ForceGemini(model) => EngineDecision {
            engine: Engine::Gemini,
            model: Some(model.clone()),
        },
        EngineMode::Auto => {
            let char_count = text.chars().count();
            let use_google = if contains_cjk(text) {
                char_count <= 5
            } else {
                let word_count = text.split_whitespace().count();
                word_count <= 3 && char_count < 30
            };

            if use_google {
                EngineDecision {
                    engine: Engine::Google,
                    model: None,
                }
            } else {
                EngineDecision {
                    engine: Engine::Gemini,
                    model: Some(default_model.to_string()),
                }
            }
        }
    }
}
