use serde_json::Value;

use crate::{TranslateError, Translator};

const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
const FALLBACK_CODE: &str = "zh-TW";

/// Adapter for the public translation endpoint. Requests the sentence,
/// back-translation, synonym and dictionary payload variants and flattens
/// whatever subset comes back into plain text.
pub struct GoogleTranslator {
    client: reqwest::Client,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslateError> {
        let tl = language_code(target_language);
        tracing::debug!(target = tl, "requesting google translation");

        let response = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", tl),
                ("dt", "t"),
                ("dt", "bd"),
                ("dt", "ss"),
                ("dt", "ex"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Http(status.as_u16()));
        }

        let payload: Value = response.json().await?;
        extract_translation(&payload).ok_or(TranslateError::Empty)
    }
}

/// Human-readable target-language names to short codes. Unknown names fall
/// back to Traditional Chinese.
fn language_code(name: &str) -> &'static str {
    match name {
        "繁體中文" => "zh-TW",
        "簡體中文" => "zh-CN",
        "英文" => "en",
        "日文" => "ja",
        "韓文" => "ko",
        "法文" => "fr",
        "德文" => "de",
        "西班牙文" => "es",
        "俄文" => "ru",
        "印地文" => "hi",
        "阿拉伯文" => "ar",
        "孟加拉文" => "bn",
        "葡萄牙文" => "pt",
        "印尼文" => "id",
        _ => FALLBACK_CODE,
    }
}

/// The payload is a deeply nested, loosely-typed array with no fixed schema
/// across variants. Part-of-speech definitions win when any were found; the
/// plain sentence segments are the fallback.
fn extract_translation(payload: &Value) -> Option<String> {
    let definitions = collect_definitions(payload);
    if !definitions.is_empty() {
        let lines: Vec<String> = definitions
            .iter()
            .map(|(pos, words)| format!("{pos}: {}", words.join(", ")))
            .collect();
        return Some(lines.join("\n"));
    }

    let sentence: String = payload
        .get(0)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|item| item.get(0).and_then(Value::as_str))
        .collect();

    if sentence.is_empty() {
        None
    } else {
        Some(sentence)
    }
}

/// Part of speech to unioned word senses, in payload order, duplicates
/// across blocks collapsed.
fn collect_definitions(payload: &Value) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();

    // The two slots known to carry synonym blocks.
    for slot in [1, 5] {
        let Some(block) = payload.get(slot) else {
            continue;
        };
        if !looks_like_synonym_block(block) {
            continue;
        }
        for part in block.as_array().into_iter().flatten() {
            let Some((pos, words)) = part_entry(part) else {
                continue;
            };
            for word in words.iter().filter_map(Value::as_str) {
                push_definition(&mut groups, pos, word);
            }
        }
    }

    // The dictionary block has no fixed slot; find it by shape.
    let dictionary = payload
        .as_array()
        .into_iter()
        .flatten()
        .find(|slot| looks_like_dictionary_block(slot));
    if let Some(block) = dictionary {
        for part in block.as_array().into_iter().flatten() {
            let Some((pos, definitions)) = part_entry(part) else {
                continue;
            };
            for definition in definitions {
                if let Some(text) = definition.get(0).and_then(Value::as_str) {
                    push_definition(&mut groups, pos, text);
                }
            }
        }
    }

    groups
}

/// Synonym blocks hold `[pos, [word, ...]]` entries with flat string word
/// lists. Any array that isn't dictionary-shaped qualifies; entries of the
/// wrong shape are skipped one by one during the scan.
fn looks_like_synonym_block(value: &Value) -> bool {
    value.is_array() && !looks_like_dictionary_block(value)
}

/// Dictionary blocks hold `[pos, [[definition, ...], ...]]` entries: the
/// second member is a list of arrays whose first element is the definition
/// string. That inner nesting is what tells them apart from synonym blocks.
fn looks_like_dictionary_block(value: &Value) -> bool {
    match first_entry_list(value) {
        Some(list) => list.first().is_some_and(Value::is_array),
        None => false,
    }
}

/// Second member of the block's first `[string, array]` entry, if the block
/// has that outer shape at all.
fn first_entry_list(value: &Value) -> Option<&Vec<Value>> {
    let entry = value.as_array()?.first()?.as_array()?;
    if entry.len() < 2 || !entry[0].is_string() {
        return None;
    }
    entry[1].as_array()
}

/// `["noun", [...]]` style pair inside a block.
fn part_entry(part: &Value) -> Option<(&str, &Vec<Value>)> {
    let entry = part.as_array()?;
    if entry.len() < 2 {
        return None;
    }
    Some((entry[0].as_str()?, entry[1].as_array()?))
}

fn push_definition(groups: &mut Vec<(String, Vec<String>)>, pos: &str, word: &str) {
    match groups.iter_mut().find(|(p, _)| p == pos) {
        Some((_, words)) => {
            if !words.iter().any(|w| w == word) {
                words.push(word.to_string());
            }
        }
        None => groups.push((pos.to_string(), vec![word.to_string()])),
    }
}
