//! Signature text parsing

use core::fmt;

/// A signature split into its name and top-level parameter list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub name: String,
    pub params: Vec<String>,
}

impl Signature {
    /// Parse `name(p1,p2,...)`.
    ///
    /// Commas nested in `<>`, `()` or `[]` do not split parameters.
    /// Returns `None` when the text is not a balanced call form.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let open = text.find('(')?;
        let inner = text.get(open + 1..)?.strip_suffix(')')?;
        let name = text[..open].trim();
        if name.is_empty() {
            return None;
        }

        let mut params = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;
        for (i, c) in inner.char_indices() {
            match c {
                '<' | '(' | '[' => depth += 1,
                '>' | ')' | ']' => depth = depth.checked_sub(1)?,
                ',' if depth == 0 => {
                    params.push(inner[start..i].trim().to_string());
                    start = i + 1;
                }
                _ => {}
            }
        }
        if depth != 0 {
            return None;
        }

        let last = inner[start..].trim();
        if !last.is_empty() || !params.is_empty() {
            params.push(last.to_string());
        }

        Some(Self {
            name: name.to_string(),
            params,
        })
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// True when `self`'s parameters start with all of `accepted`'s
    pub fn feeds(&self, accepted: &Signature) -> bool {
        accepted.params.len() <= self.params.len()
            && accepted
                .params
                .iter()
                .zip(&self.params)
                .all(|(want, have)| want == have)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.params.join(","))
    }
}
