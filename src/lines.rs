/// Iterate over lines, keeping their terminators.
///
/// Concatenating every yielded line reproduces the input, which lets callers
/// turn a run of lines back into a single slice of the original message.
pub(crate) struct LinesWithTerminator<'a> {
    data: &'a str,
}

impl<'a> LinesWithTerminator<'a> {
    pub(crate) fn new(data: &'a str) -> LinesWithTerminator<'a> {
        LinesWithTerminator { data }
    }
}

impl<'a> Iterator for LinesWithTerminator<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<&'a str> {
        if self.data.is_empty() {
            return None;
        }
        let end = self
            .data
            .find('\n')
            .map(|i| i + 1)
            .unwrap_or(self.data.len());
        let (line, rest) = self.data.split_at(end);
        self.data = rest;
        Some(line)
    }
}

/// Strip the line terminator, tolerating `\r\n`.
pub(crate) fn content(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}
