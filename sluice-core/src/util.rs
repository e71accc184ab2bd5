use crate::Error;

/// Longest prefix of `input` fitting in `len` bytes without splitting a character.
pub fn truncate_str(input: &str, len: usize) -> &str {
    if input.len() <= len {
        return input;
    }
    let mut end = len;
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    &input[..end]
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            $crate::truncate_str(&$query, 497).trim_end(),
            if $query.len() > 497 { "..." } else { "" },
        )
    };
}

/// Logs `error` with its chain of sources.
pub fn log_error(error: &Error) {
    log::error!("{:#}", anyhow::Error::from(error.clone()));
}
