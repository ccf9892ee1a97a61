pub trait DbTable {
    const NAME_SINGULAR: &'static str;
    const NAME_PLURAL: &'static str;
    const TABLE_NAME: &'static str = Self::NAME_PLURAL;
}

/// Fields that identify a record uniquely across catalogs.
///
/// Any of them matching is enough to treat two records as the same one, so
/// identifier lookups match against all of them at once.
pub trait DeduplicationFields {
    const DEDUPLICATION_FIELDS: &'static [&'static str];
}
