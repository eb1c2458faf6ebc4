use crate::db::{LocalizedValue, PersonName};

/// A setting value tagged with the locale it was stored under.
pub trait Localized {
    fn locale(&self) -> &str;

    /// Blank candidates are never selected.
    fn is_blank(&self) -> bool;
}

impl Localized for LocalizedValue {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn is_blank(&self) -> bool {
        self.value.is_empty()
    }
}

impl Localized for PersonName {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn is_blank(&self) -> bool {
        self.given_name.is_empty() || self.family_name.is_empty()
    }
}

/// Picks the candidate stored under `locale`, else the first non-blank one.
///
/// OJS does not enforce metadata translations, so the preferred locale may
/// simply be missing; any other non-blank variant is acceptable then.
pub fn select_preferred<'a, T: Localized>(candidates: &'a [T], locale: &str) -> Option<&'a T> {
    let mut usable = candidates.iter().filter(|c| !c.is_blank());

    usable
        .clone()
        .find(|c| c.locale() == locale)
        .or_else(|| usable.next())
}
