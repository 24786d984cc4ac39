//! Tag synonym table and expansion.
//!
//! Each canonical tag owns a group of alternate spellings (katakana readings,
//! abbreviations, English names). A canonical tag and its synonyms form one
//! equivalence group; expanding any member yields the whole group.
//!
//! The table is deliberately not consulted by the browse filters, which match
//! brands and models by substring only.

use std::collections::BTreeSet;

static TAG_SYNONYMS: &[(&str, &[&str])] = &[
    // categories
    ("CPU", &["プロセッサー", "プロセッサ", "シーピーユー"]),
    ("GPU", &["グラフィックカード", "グラフィックボード", "グラボ", "ビデオカード"]),
    ("マザーボード", &["マザボ", "マザー", "基盤"]),
    ("メモリ", &["RAM", "メモリー", "DRAM"]),
    ("ストレージ", &["SSD", "HDD", "NVMe", "ハードディスク"]),
    ("PCケース", &["ケース", "シャーシ"]),
    ("電源", &["PSU", "パワーサプライ"]),
    ("モニター", &["ディスプレイ", "ディスプレー", "液晶", "モニタ"]),
    // brands
    ("Intel", &["インテル"]),
    ("AMD", &["エーエムディー"]),
    ("NVIDIA", &["エヌビディア", "ンビディア"]),
    ("ASUS", &["エイスース", "アスース"]),
    ("MSI", &["エムエスアイ"]),
    ("GIGABYTE", &["ギガバイト"]),
    // models
    ("Core i9", &["i9", "アイナイン"]),
    ("Core i7", &["i7", "アイセブン"]),
    ("Core i5", &["i5", "アイファイブ"]),
    ("Ryzen 9", &["ライゼン9"]),
    ("Ryzen 7", &["ライゼン7"]),
    ("Ryzen 5", &["ライゼン5"]),
    ("RTX 4090", &["4090"]),
    ("RTX 4080", &["4080"]),
    ("RTX 4070", &["4070"]),
];

fn groups_containing(tag: &str) -> impl Iterator<Item = (&'static str, &'static [&'static str])> + '_ {
    TAG_SYNONYMS
        .iter()
        .copied()
        .filter(move |(canonical, synonyms)| *canonical == tag || synonyms.contains(&tag))
}

/// Canonical tag the given spelling belongs to, if it is in the table.
///
/// A canonical tag is its own canonical form.
pub fn canonical(tag: &str) -> Option<&'static str> {
    groups_containing(tag).map(|(canonical, _)| canonical).next()
}

/// The tag followed by every spelling treated as equivalent to it.
///
/// Tags missing from the table resolve to themselves alone.
///
/// # Examples
/// ```
/// use storefront::domain::tag_synonyms;
///
/// assert_eq!(
///     tag_synonyms::synonyms("Ryzen 7"),
///     vec!["Ryzen 7".to_owned(), "ライゼン7".to_owned()],
/// );
/// assert_eq!(tag_synonyms::synonyms("Zen 4"), vec!["Zen 4".to_owned()]);
/// ```
pub fn synonyms(tag: &str) -> Vec<String> {
    let mut result = vec![tag.to_owned()];
    for (canonical, group) in groups_containing(tag) {
        for spelling in std::iter::once(canonical).chain(group.iter().copied()) {
            if !result.iter().any(|existing| existing == spelling) {
                result.push(spelling.to_owned());
            }
        }
    }
    result
}

/// Union of the synonym groups of every tag, without duplicates.
///
/// Expansion runs to a fixed point, so expanding an already expanded set
/// returns the same set.
pub fn expand<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut expanded = BTreeSet::new();
    let mut pending: Vec<String> = tags.into_iter().map(|tag| tag.as_ref().to_owned()).collect();
    while let Some(tag) = pending.pop() {
        if expanded.contains(&tag) {
            continue;
        }
        pending.extend(
            synonyms(&tag)
                .into_iter()
                .filter(|spelling| !expanded.contains(spelling)),
        );
        expanded.insert(tag);
    }
    expanded
}
