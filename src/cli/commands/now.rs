use crate::errors::AppResult;
use crate::utils::bangkok_now;

/// Handle the `now` command: print the restaurant's local time (RFC 3339).
pub fn handle() -> AppResult<()> {
    println!("{}", bangkok_now().to_rfc3339());
    Ok(())
}
