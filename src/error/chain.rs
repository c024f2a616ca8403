use std::error::Error;
use std::fmt::Write as _;

/// Renders an error followed by its `source()` chain, separated by `: `.
#[must_use]
pub fn display_chain(err: &(dyn Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut current = err.source();
    while let Some(source) = current {
        let text = source.to_string();
        if !rendered.ends_with(&text) {
            let _ignored = write!(rendered, ": {}", text);
        }
        current = source.source();
    }
    rendered
}
