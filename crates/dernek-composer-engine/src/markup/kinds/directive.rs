/// Outer delimiters shared by style tags and table directives.
pub struct Directive;

impl Directive {
    pub const OPEN: &'static str = "[[";
    pub const CLOSE: &'static str = "]]";

    /// Wraps a body in `[[` `]]`.
    pub fn wrap(body: &str) -> String {
        format!("{}{body}{}", Self::OPEN, Self::CLOSE)
    }
}
