use crate::cards::deck::Deck;
use crate::cards::hand::Hand;
use crate::error::Error;
use crate::error::Result;
use crate::gameplay::edge::Edge;
use crate::gameplay::game::Game;
use crate::gameplay::path::Path;
use crate::Chips;

/// reconstructs the canonical Path for a live history string.
///
/// the tokens replay through the actual rules from a fresh hand, so
/// street segmentation comes out exactly as training produced it and
/// impossible histories surface as InvalidState. absolute `b<int>`
/// tokens snap to the nearest tagged size at their decision point;
/// the cards themselves never matter here, only the betting.
pub struct Recall;

enum Token {
    Tag(Edge),
    Chips(Chips),
}

impl Recall {
    pub fn path(history: &str) -> Result<Path> {
        let mut path = Path::default();
        let dead = "2h7d2s7c".parse::<Hand>().expect("static holes");
        let mut deck = Deck::from(dead);
        let mut game = Game::root([
            "2h7d".parse().expect("static hole"),
            "2s7c".parse().expect("static hole"),
        ]);
        for token in Self::tokens(history)? {
            while game.turn().is_chance() {
                let n = game.street().n_revealed();
                game = game.reveal(deck.deal(n));
                path.advance();
            }
            if game.turn().is_terminal() {
                return Err(Error::InvalidState("actions after terminal".to_string()));
            }
            let edge = Self::edge(&game, token)?;
            game = game.apply(game.actionize(&edge))?;
            path.push(edge);
        }
        while game.turn().is_chance() {
            let n = game.street().n_revealed();
            game = game.reveal(deck.deal(n));
            path.advance();
        }
        Ok(path)
    }

    /// resolve a token at its decision point. tags pass through;
    /// chip amounts take the legal aggressive edge nearest in size
    fn edge(game: &Game, token: Token) -> Result<Edge> {
        match token {
            Token::Tag(edge) => Ok(edge),
            Token::Chips(chips) => game
                .edges()
                .into_iter()
                .filter(|e| e.is_aggro())
                .map(|e| (e, game.actionize(&e).chips()))
                .min_by_key(|(_, amount)| (amount - chips).abs())
                .map(|(e, _)| e)
                .ok_or_else(|| Error::InvalidState(format!("no bet of {} available", chips))),
        }
    }

    fn tokens(history: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let ref mut chars = history.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '/' => {}
                'f' => tokens.push(Token::Tag(Edge::Fold)),
                'k' => tokens.push(Token::Tag(Edge::Check)),
                'c' => tokens.push(Token::Tag(Edge::Call)),
                'b' => match chars.peek() {
                    Some(c) if c.is_ascii_digit() => {
                        let mut digits = String::new();
                        while chars.peek().map(|c| c.is_ascii_digit()).unwrap_or(false) {
                            digits.push(chars.next().expect("peeked"));
                        }
                        let chips = digits
                            .parse::<Chips>()
                            .map_err(|_| Error::Parse(format!("not a bet: b{}", digits)))?;
                        tokens.push(Token::Chips(chips));
                    }
                    _ => {
                        let tag = (0..3).filter_map(|_| chars.next()).collect::<String>();
                        let edge = format!("b{}", tag).parse::<Edge>()?;
                        tokens.push(Token::Tag(edge));
                    }
                },
                c => return Err(Error::Parse(format!("not a history token: {}", c))),
            }
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_is_root() {
        assert_eq!(Recall::path("").unwrap(), Path::default());
    }

    #[test]
    fn tags_replay_canonically() {
        assert_eq!(Recall::path("ck").unwrap().to_string(), "ck/");
        assert_eq!(Recall::path("ck/").unwrap().to_string(), "ck/");
        assert_eq!(Recall::path("ck/kbMIDc").unwrap().to_string(), "ck/kbMIDc/");
        assert_eq!(Recall::path("cbMIDc").unwrap().to_string(), "cbMIDc/");
    }

    #[test]
    fn open_streets_have_no_trailing_separator() {
        assert_eq!(Recall::path("c").unwrap().to_string(), "c");
        assert_eq!(Recall::path("ck/k").unwrap().to_string(), "ck/k");
    }

    #[test]
    fn absolute_sizes_snap_to_tags() {
        // at the root the min raise is 3 chips in, the pot raise 4
        assert_eq!(Recall::path("b3").unwrap().to_string(), "bMIN");
        assert_eq!(Recall::path("b4").unwrap().to_string(), "bMID");
        assert_eq!(Recall::path("b99").unwrap().to_string(), "bMAX");
    }

    #[test]
    fn impossible_histories_are_surfaced() {
        assert!(matches!(Recall::path("k"), Err(Error::InvalidState(_))));
        assert!(matches!(Recall::path("ff"), Err(Error::InvalidState(_))));
        assert!(matches!(Recall::path("zz"), Err(Error::Parse(_))));
        assert!(matches!(Recall::path("bQQ"), Err(Error::Parse(_))));
    }
}
