use super::edge::Edge;
use crate::error::Error;

/// the betting history of one hand, segmented by street.
///
/// the canonical text form joins per-street edge letters with `/`,
/// with a trailing separator once a street has closed: `c/kbMID/kk/`.
/// this string is one third of every info set key, so its encoding
/// must agree between training and query.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path(Vec<Vec<Edge>>);

impl Default for Path {
    fn default() -> Self {
        Self(vec![Vec::new()])
    }
}

impl Path {
    pub fn push(&mut self, edge: Edge) {
        self.0.last_mut().expect("at least one segment").push(edge);
    }
    /// close the current street's segment
    pub fn advance(&mut self) {
        self.0.push(Vec::new());
    }
    pub fn pushed(&self, edge: Edge) -> Self {
        let mut next = self.clone();
        next.push(edge);
        next
    }
    pub fn advanced(&self) -> Self {
        let mut next = self.clone();
        next.advance();
        next
    }
}

impl std::str::FromStr for Path {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = s
            .split('/')
            .map(Self::segment)
            .collect::<Result<Vec<Vec<Edge>>, Error>>()?;
        Ok(Self(segments))
    }
}

impl Path {
    fn segment(s: &str) -> Result<Vec<Edge>, Error> {
        let mut edges = Vec::new();
        let mut chars = s.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                'f' | 'k' | 'c' => edges.push(c.to_string().parse::<Edge>()?),
                'b' => {
                    let tag = s
                        .get(i..i + 4)
                        .ok_or_else(|| Error::Parse(format!("truncated bet tag: {}", s)))?;
                    edges.push(tag.parse::<Edge>()?);
                    chars.nth(2);
                }
                _ => return Err(Error::Parse(format!("not a history: {}", s))),
            }
        }
        Ok(edges)
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let text = self
            .0
            .iter()
            .map(|seg| seg.iter().map(Edge::to_string).collect::<String>())
            .collect::<Vec<String>>()
            .join("/");
        write!(f, "{}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::edge::Size;

    #[test]
    fn canonical_text() {
        let mut path = Path::default();
        path.push(Edge::Call);
        path.advance();
        path.push(Edge::Check);
        path.push(Edge::Raise(Size::Mid));
        path.advance();
        path.push(Edge::Check);
        path.push(Edge::Check);
        path.advance();
        assert_eq!(path.to_string(), "c/kbMID/kk/");
    }

    #[test]
    fn bijective_text() {
        for text in ["", "c", "c/kbMID/kk/", "bMINc/bMAXc/", "f"] {
            assert_eq!(text.parse::<Path>().unwrap().to_string(), text);
        }
    }

    #[test]
    fn rejects_garbage() {
        assert!("x".parse::<Path>().is_err());
        assert!("bMI".parse::<Path>().is_err());
        assert!("bQQQ".parse::<Path>().is_err());
    }
}
