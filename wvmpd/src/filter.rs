use anyhow::{Context, Result};
use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;
use std::{fs, path::Path};

/// Per-channel representation cap.
///
/// When a channel matches, `bounds` is replaced with `capped_bounds` and the
/// `<Representation id="...">` element named by `representation` is removed
/// together with its children.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct FilterRule {
    pub channels: Vec<String>,
    pub bounds: String,
    pub capped_bounds: String,
    pub representation: String,
}

impl FilterRule {
    pub fn matches(&self, channel: &str) -> bool {
        self.channels.iter().any(|x| x == channel)
    }

    pub fn apply(&self, text: &str) -> String {
        let mut text = text.to_owned();

        if !self.bounds.is_empty() && text.contains(&self.bounds) {
            text = text.replace(&self.bounds, &self.capped_bounds);
        } else {
            debug!("Bounds not found: {}", self.bounds);
        }

        let re = format!(
            r#"(?s)<Representation id="{}"(?:[^>]*/>|.*?</Representation>)"#,
            regex::escape(&self.representation)
        );

        match Regex::new(&re) {
            Ok(re) => re.replace_all(&text, "").into_owned(),
            Err(e) => {
                warn!("Skipping representation filter {}: {}", self.representation, e);
                text
            }
        }
    }
}

/// Rules applied when no rules file is given.
pub fn default_rules() -> Vec<FilterRule> {
    vec![FilterRule {
        channels: vec!["244".to_owned(), "599".to_owned()],
        bounds: r#"minBandwidth="226400" maxBandwidth="3187600" maxWidth="1920" maxHeight="1080""#
            .to_owned(),
        capped_bounds:
            r#"minBandwidth="226400" maxBandwidth="2452400" maxWidth="1280" maxHeight="720""#
                .to_owned(),
        representation: "video=3187600".to_owned(),
    }]
}

/// Read rules from a json array.
pub fn load_rules(path: &Path) -> Result<Vec<FilterRule>> {
    let data = fs::read(path).with_context(|| format!("could not read {}", path.display()))?;
    serde_json::from_slice(&data)
        .with_context(|| format!("could not deserialize filter rules from {}", path.display()))
}

pub fn find<'a>(rules: &'a [FilterRule], channel: &str) -> Option<&'a FilterRule> {
    rules.iter().find(|x| x.matches(channel))
}
