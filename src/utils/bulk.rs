use crate::models::batch::{InvitationRequest, LineError, ParsedLine};
use crate::utils::time::parse_schedule;

/// Parses a raw bulk payload: one `email, role, YYYY-MM-DD HH:MM` record
/// per line. Blank lines are skipped; invalid lines become per-line
/// errors keyed by 1-based line number and never abort the batch.
pub fn parse_bulk(raw: &str) -> Vec<Result<ParsedLine, LineError>> {
    raw.lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            if line.trim().is_empty() {
                None
            } else {
                Some(parse_line(idx + 1, line))
            }
        })
        .collect()
}

fn parse_line(number: usize, line: &str) -> Result<ParsedLine, LineError> {
    let invalid = |reason: &str| LineError {
        line: number,
        reason: reason.to_string(),
    };

    // Split on the first two commas only; role text may not contain commas
    // but the schedule field never does, so three fields is the contract.
    let mut fields = line.splitn(3, ',');
    let email = fields.next().map(str::trim).unwrap_or_default();
    let role = fields.next().map(str::trim).unwrap_or_default();
    let schedule = fields.next().map(str::trim).unwrap_or_default();

    if email.is_empty() || role.is_empty() || schedule.is_empty() {
        return Err(invalid("expected 'email, role, YYYY-MM-DD HH:MM'"));
    }
    if !is_valid_email(email) {
        return Err(invalid("malformed email address"));
    }
    let scheduled_at = parse_schedule(schedule)
        .ok_or_else(|| invalid("date-time must match YYYY-MM-DD HH:MM"))?;

    Ok(ParsedLine {
        line: number,
        request: InvitationRequest {
            email: email.to_string(),
            role: role.to_string(),
            scheduled_at,
        },
    })
}

/// Exactly one `@` with a non-empty local part and domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.matches('@').count() != 1 {
        return false;
    }
    let (local, domain) = email.split_once('@').unwrap_or(("", ""));
    !local.is_empty() && !domain.is_empty()
}
