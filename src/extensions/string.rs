pub trait StrExt {
    /// Returns a trimmed copy with `/` and `.` date separators turned into `-`.
    fn to_dash_separators(&self) -> String;

    /// `None` for empty or whitespace-only input.
    fn non_blank(&self) -> Option<&str>;
}

impl StrExt for str {
    fn to_dash_separators(&self) -> String {
        self.trim().replace(['/', '.'], "-")
    }

    fn non_blank(&self) -> Option<&str> {
        let trimmed = self.trim();
        (!trimmed.is_empty()).then_some(self)
    }
}
