use core_types::{CoreError, FinancialEntry, SortDirective};

/// Orders a plain listing by caller-supplied field names.
///
/// Names are resolved against the sort whitelist first; an unknown name fails
/// the request before anything is reordered.
pub fn sorted_listing<S: AsRef<str>>(
    mut entries: Vec<FinancialEntry>,
    fields: &[S],
) -> Result<Vec<FinancialEntry>, CoreError> {
    let directive = SortDirective::resolve(fields)?;
    directive.apply(&mut entries);
    Ok(entries)
}
