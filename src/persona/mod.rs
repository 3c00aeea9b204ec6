// src/persona/mod.rs
// The two fixed teaching personas. Definitions are built once at startup and
// injected into the chat service; nothing mutates them afterwards.

pub mod hitesh;
pub mod piyush;

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// How many scraped style examples get spliced into a persona prompt.
const STYLE_EXAMPLE_CAP: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaId {
    Hitesh,
    Piyush,
}

impl PersonaId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaId::Hitesh => "hitesh",
            PersonaId::Piyush => "piyush",
        }
    }
}

impl std::fmt::Display for PersonaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PersonaId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hitesh" => Ok(PersonaId::Hitesh),
            "piyush" => Ok(PersonaId::Piyush),
            _ => Err(()),
        }
    }
}

/// A complete persona: instruction text plus the model parameters every
/// request under this persona uses.
#[derive(Debug, Clone)]
pub struct PersonaDefinition {
    pub id: PersonaId,
    pub name: &'static str,
    pub description: &'static str,
    pub prompt: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Shape of the scraped style-example files produced by the offline tooling.
#[derive(Debug, Deserialize)]
struct StyleExample {
    content: String,
}

fn load_style_examples(dir: &Path, key: &str, fallback: &[&str]) -> Vec<String> {
    let path = dir.join(format!("{key}-raw.json"));
    match std::fs::read_to_string(&path) {
        Ok(raw) => match serde_json::from_str::<Vec<StyleExample>>(&raw) {
            Ok(items) if !items.is_empty() => {
                debug!("loaded {} style examples from {}", items.len(), path.display());
                items
                    .into_iter()
                    .take(STYLE_EXAMPLE_CAP)
                    .map(|e| e.content)
                    .collect()
            }
            Ok(_) => fallback.iter().map(|s| s.to_string()).collect(),
            Err(e) => {
                warn!("could not parse {}: {}", path.display(), e);
                fallback.iter().map(|s| s.to_string()).collect()
            }
        },
        Err(_) => fallback.iter().map(|s| s.to_string()).collect(),
    }
}

fn splice_examples(base: &str, examples: &[String]) -> String {
    let block = examples
        .iter()
        .map(|e| format!("- \"{e}\""))
        .collect::<Vec<_>>()
        .join("\n");
    base.replace("{examples}", &block)
}

/// Process-wide persona table, read-only after startup.
#[derive(Debug)]
pub struct PersonaRegistry {
    hitesh: PersonaDefinition,
    piyush: PersonaDefinition,
}

impl PersonaRegistry {
    /// Build both personas, enriching their prompts from scraped style
    /// examples under `data_dir` when present.
    pub fn load(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        let hitesh_examples =
            load_style_examples(data_dir, "hitesh", hitesh::FALLBACK_EXAMPLES);
        let piyush_examples =
            load_style_examples(data_dir, "piyush", piyush::FALLBACK_EXAMPLES);

        Self {
            hitesh: PersonaDefinition {
                id: PersonaId::Hitesh,
                name: hitesh::NAME,
                description: hitesh::DESCRIPTION,
                prompt: splice_examples(hitesh::BASE_PROMPT, &hitesh_examples),
                model: "gpt-4o".to_string(),
                temperature: 0.8,
                max_tokens: 2000,
            },
            piyush: PersonaDefinition {
                id: PersonaId::Piyush,
                name: piyush::NAME,
                description: piyush::DESCRIPTION,
                prompt: splice_examples(piyush::BASE_PROMPT, &piyush_examples),
                model: "gpt-4o".to_string(),
                temperature: 0.7,
                max_tokens: 2000,
            },
        }
    }

    pub fn get(&self, id: PersonaId) -> &PersonaDefinition {
        match id {
            PersonaId::Hitesh => &self.hitesh,
            PersonaId::Piyush => &self.piyush,
        }
    }

    /// Resolve a persona key from the wire, rejecting unknown values.
    pub fn resolve(&self, key: &str) -> Option<&PersonaDefinition> {
        key.parse::<PersonaId>().ok().map(|id| self.get(id))
    }

    pub fn all(&self) -> [&PersonaDefinition; 2] {
        [&self.hitesh, &self.piyush]
    }
}
