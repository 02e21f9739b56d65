/// The three source-reported facts needed to estimate pay for one vacancy:
/// salary fork bounds plus whether the figure is in roubles at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSalary {
    pub from: Option<u32>,
    pub to: Option<u32>,
    pub is_rub: bool,
}

/// Collapse a salary fork into a single rouble estimate.
///
/// Vacancies priced in another currency, or with no bounds at all, have no
/// estimate. A one-sided fork is scaled towards its likely midpoint: the
/// upper bound down by 20%, the lower bound up by 20%.
pub fn estimate_rub_salary(salary: &RawSalary) -> Option<u32> {
    if !salary.is_rub {
        return None;
    }
    match (salary.from, salary.to) {
        (None, None) => None,
        (None, Some(to)) => Some((to as u64 * 4 / 5) as u32),
        (Some(from), None) => Some((from as u64 * 6 / 5) as u32),
        (Some(from), Some(to)) => Some(((from as u64 + to as u64) / 2) as u32),
    }
}

/// Sources report a missing bound as null, 0 or a junk negative; fold all of
/// those into `None`.
pub(crate) fn positive_bound(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|bound| *bound > 0)
}
