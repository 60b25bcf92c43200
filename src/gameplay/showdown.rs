use super::game::Game;
use super::seat::State;
use crate::cards::hand::Hand;
use crate::evaluation::strength::Strength;
use crate::Chips;
use std::cmp::Ordering;

/// one seat's terminal accounting
#[derive(Debug, Clone, Copy)]
pub struct Settlement {
    pub reward: Chips,
    pub risked: Chips,
}

impl Settlement {
    pub fn pnl(&self) -> Chips {
        self.reward - self.risked
    }
}

/// terminal resolution of a heads-up hand.
///
/// with two equal stacks there are no side pots: a fold forfeits
/// the pot, a showdown compares strengths over the board, and a
/// chopped pot returns each player's own contribution.
pub struct Showdown;

impl Showdown {
    pub fn settle(game: &Game) -> [Settlement; crate::N] {
        let spent = [game.seat(0).spent(), game.seat(1).spent()];
        let rewards = match game.folded() {
            Some(folder) => {
                let mut rewards = [0, 0];
                rewards[1 - folder] = game.pot();
                rewards
            }
            None => {
                let hero = Self::strength(game, 0);
                let them = Self::strength(game, 1);
                log::trace!("{} vs {}", hero, them);
                match hero.cmp(&them) {
                    Ordering::Greater => [game.pot(), 0],
                    Ordering::Less => [0, game.pot()],
                    Ordering::Equal => spent,
                }
            }
        };
        [
            Settlement {
                reward: rewards[0],
                risked: spent[0],
            },
            Settlement {
                reward: rewards[1],
                risked: spent[1],
            },
        ]
    }

    fn strength(game: &Game, position: usize) -> Strength {
        assert!(game.seat(position).state() != State::Folding);
        assert!(game.board().size() == 5);
        Strength::from(Hand::add(
            Hand::from(game.seat(position).cards()),
            game.board(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::hole::Hole;
    use crate::cards::street::Street;
    use crate::gameplay::action::Action;
    use crate::gameplay::deal::Deal;
    use crate::gameplay::turn::Turn;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn showdown(holes: [Hole; 2], seed: u64) -> [Settlement; 2] {
        let mut rng = SmallRng::seed_from_u64(seed);
        let dead = Hand::add(Hand::from(holes[0]), Hand::from(holes[1]));
        let deal = loop {
            let deal = Deal::random(&mut rng);
            let runout = Hand::add(
                Hand::add(deal.reveal(Street::Pref), deal.reveal(Street::Flop)),
                deal.reveal(Street::Turn),
            );
            if u64::from(dead) & u64::from(runout) == 0 {
                break deal;
            }
        };
        let mut game = Game::root(holes);
        game = game.apply(Action::Call(1)).unwrap();
        game = game.apply(Action::Check).unwrap();
        while !game.turn().is_terminal() {
            match game.turn() {
                Turn::Chance => game = game.reveal(deal.reveal(game.street())),
                _ => game = game.apply(Action::Check).unwrap(),
            }
        }
        Showdown::settle(&game)
    }

    #[test]
    fn settlements_are_zero_sum() {
        for seed in 0..50 {
            let holes = ["AhAd".parse().unwrap(), "KsKc".parse().unwrap()];
            let [a, b] = showdown(holes, seed);
            assert_eq!(a.pnl() + b.pnl(), 0);
        }
    }
}
