//! Member filters used by the cumulative queries.

use super::member::MemberCommon;

/// A predicate over members, matched per member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberFilter {
    All,
    Nothing,
    NotExcluded,
    Excluded,
    /// Neither deprecated nor excluded.
    Strict,
    DeprecatedOrExcluded,
    Deprecated,
    Custom(fn(&MemberCommon) -> bool),
}

impl MemberFilter {
    pub fn matches(self, member: &MemberCommon) -> bool {
        match self {
            MemberFilter::All => true,
            MemberFilter::Nothing => false,
            MemberFilter::NotExcluded => !member.excluded,
            MemberFilter::Excluded => member.excluded,
            MemberFilter::Strict => !member.deprecated && !member.excluded,
            MemberFilter::DeprecatedOrExcluded => member.deprecated || member.excluded,
            MemberFilter::Deprecated => member.deprecated,
            MemberFilter::Custom(predicate) => predicate(member),
        }
    }
}

/// A selector/rejector pair.
///
/// Selected members are reported. Rejected members are not reported, and
/// they hide inherited members with the same key. Members matched by
/// neither are skipped without hiding anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChildFilter {
    pub selector: MemberFilter,
    pub rejector: MemberFilter,
}

impl ChildFilter {
    /// Current syntax: deprecated and excluded members are left out.
    pub const STRICT: Self = Self {
        selector: MemberFilter::Strict,
        rejector: MemberFilter::DeprecatedOrExcluded,
    };

    /// Compatibility syntax: only excluded members are left out.
    pub const COMPATIBILITY: Self = Self {
        selector: MemberFilter::NotExcluded,
        rejector: MemberFilter::Excluded,
    };

    /// Everything, nothing rejected.
    pub const ALL: Self = Self {
        selector: MemberFilter::All,
        rejector: MemberFilter::Nothing,
    };

    pub const fn new(selector: MemberFilter, rejector: MemberFilter) -> Self {
        Self { selector, rejector }
    }
}
