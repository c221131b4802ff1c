/*
    REFERENCES
    ----------

    1. https://github.com/emarsden/dash-mpd-rs/blob/7e985069fd95fd5d9993b7610c28228d2448aea7/src/fetch.rs#L1422-L1460

*/

use regex::{Captures, Regex};
use std::{collections::HashMap, sync::LazyLock};

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(RepresentationID|Number|Time|Bandwidth)(?:%0(\d+)d)?\$").unwrap()
});

/// `SegmentTemplate` identifier substitution (`$RepresentationID$`, `$Number%05d$`, ...).
#[derive(Default)]
pub(super) struct Template {
    vars: HashMap<&'static str, String>,
}

impl Template {
    pub(super) fn insert(&mut self, var: &'static str, val: String) {
        self.vars.insert(var, val);
    }

    /// Unknown identifiers are left untouched.
    pub(super) fn resolve(&self, template: &str) -> String {
        IDENTIFIER
            .replace_all(template, |caps: &Captures| match self.vars.get(&caps[1]) {
                Some(value) => match caps.get(2).and_then(|x| x.as_str().parse::<usize>().ok()) {
                    Some(width) => format!("{value:0>width$}"),
                    None => value.to_owned(),
                },
                None => caps[0].to_owned(),
            })
            .replace("$$", "$")
    }
}
