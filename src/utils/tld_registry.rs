//! Allow-list of top-level domains accepted by the URL format check.
//!
//! The list is curated rather than the full IANA registry: rejecting a typo
//! such as `example.con` matters more here than accepting an obscure TLD.
//! The registry is built once at startup and shared read-only.

use std::collections::HashSet;

/// Built-in TLDs used when no override is configured.
#[rustfmt::skip]
pub const BUILTIN_TLDS: &[&str] = &[
    "com", "org", "net", "edu", "gov", "mil", "int",
    "us", "uk", "ca", "au", "de", "fr", "jp", "cn", "in", "br", "ru", "it", "es", "mx", "nl", "se",
    "no", "fi", "dk",
    "io", "ai", "app", "dev", "tech", "cloud", "online", "site", "website", "space", "store", "shop",
    "blog", "news",
    "info", "biz", "name", "mobi", "asia", "tel", "travel", "jobs", "pro", "coop", "aero", "museum",
    "xyz", "top", "win", "club", "vip", "life", "world", "live", "today", "fun", "art", "design",
    "studio",
    "agency", "company", "digital", "media", "solutions", "services", "consulting", "marketing",
    "academy",
    "education", "university", "school", "college", "training", "institute",
    "money", "finance", "bank", "credit", "insurance", "loan", "tax", "accountant",
    "health", "fitness", "dental", "care", "clinic", "doctor", "hospital", "medical", "pharmacy",
    "surgery",
    "realestate", "property", "homes", "house", "land", "estate", "mortgage",
    "auto", "car", "cars", "motorcycles", "bike", "boats",
    "food", "restaurant", "pizza", "recipes", "cafe", "bar", "pub",
    "fashion", "clothing", "shoes", "jewelry", "boutique",
    "music", "film", "video", "movie", "photo", "camera", "gallery",
    "game", "games", "casino", "poker", "bet", "sport", "football", "soccer", "golf", "hockey",
    "hotel", "vacation", "cruise", "flights", "tours", "holiday",
    "lawyer", "attorney", "legal", "law",
    "engineer", "construction", "contractors", "builders",
    "energy", "solar", "green", "eco",
    "events", "party", "wedding", "christmas",
    "family", "baby", "kids", "toys",
    "pet", "dog", "vet",
    "social", "chat", "email", "link", "network",
    "dating", "singles", "sex", "porn", "adult", "xxx",
    "gifts", "flowers", "diamonds",
    "tools", "equipment", "parts", "supplies",
    "security", "protection", "guard", "safe",
    "cleaning", "plumbing", "electrical", "repair",
    "codes", "software", "computer", "systems", "hosting", "domains", "server",
    "co", "me", "ly", "tv", "cc", "ws", "am", "fm", "to", "be", "at", "nu", "ag", "sh", "ac", "ad",
    "im",
    "ae", "af", "al", "ar", "bd", "bg", "bo", "by", "cl", "cr", "cz", "do", "ec", "ee", "eg", "gr",
    "gt",
    "hk", "hr", "hu", "id", "ie", "il", "ir", "is", "ke", "kr", "kz", "lk", "lt", "lu", "lv", "ma",
    "md", "mk",
    "mt", "my", "ng", "ni", "nz", "pa", "pe", "ph", "pk", "pl", "pt", "py", "qa", "ro", "rs", "sa",
    "sg", "si",
    "sk", "th", "tn", "tr", "tw", "ua", "uy", "uz", "ve", "vn", "za",
];

/// Set of recognized TLDs, stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TldRegistry {
    tlds: HashSet<String>,
}

impl TldRegistry {
    /// Builds a registry from arbitrary entries.
    ///
    /// Entries are trimmed, lower-cased and stripped of a leading dot; blank
    /// entries are ignored.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tlds = entries
            .into_iter()
            .filter_map(|entry| canonical_tld(entry.as_ref()))
            .collect();

        Self { tlds }
    }

    /// Parses a newline-separated list. Lines starting with `#` are comments.
    pub fn parse_list(content: &str) -> Self {
        Self::from_entries(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    /// Adds entries to the registry.
    pub fn extend<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tlds
            .extend(entries.into_iter().filter_map(|e| canonical_tld(e.as_ref())));
    }

    /// Returns true if `tld` (compared case-insensitively) is recognized.
    pub fn contains(&self, tld: &str) -> bool {
        self.tlds.contains(&tld.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.tlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tlds.is_empty()
    }
}

impl Default for TldRegistry {
    fn default() -> Self {
        Self::from_entries(BUILTIN_TLDS.iter().copied())
    }
}

fn canonical_tld(entry: &str) -> Option<String> {
    let tld = entry.trim().trim_start_matches('.').to_ascii_lowercase();
    (!tld.is_empty()).then_some(tld)
}
