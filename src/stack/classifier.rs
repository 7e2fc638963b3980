//! Extension based language histogram

use super::LanguageId;
use std::collections::BTreeMap;
use std::path::Path;

/// Counts files per language. Files without a known programming-language
/// extension are ignored.
pub fn language_histogram<I, S>(paths: I) -> BTreeMap<LanguageId, usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut histogram = BTreeMap::new();
    for path in paths {
        let ext = Path::new(path.as_ref())
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        if let Some(lang) = ext.as_deref().and_then(LanguageId::from_extension) {
            *histogram.entry(lang).or_insert(0) += 1;
        }
    }
    histogram
}

/// Highest count wins; ties go to the language declared first in `LanguageId`.
/// Returns `Unknown` for an empty histogram.
pub fn primary_language(histogram: &BTreeMap<LanguageId, usize>) -> LanguageId {
    let mut best: Option<(&LanguageId, usize)> = None;
    // BTreeMap iterates in priority order, so only a strictly greater count replaces
    for (lang, &count) in histogram {
        if count == 0 {
            continue;
        }
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((lang, count)),
        }
    }
    best.map(|(lang, _)| lang.clone()).unwrap_or_default()
}
