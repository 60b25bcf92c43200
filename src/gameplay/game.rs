use super::action::Action;
use super::edge::Edge;
use super::edge::Size;
use super::seat::Seat;
use super::seat::State;
use super::showdown::Showdown;
use super::turn::Turn;
use crate::cards::hand::Hand;
use crate::cards::hole::Hole;
use crate::cards::observation::Observation;
use crate::cards::street::Street;
use crate::error::Error;
use crate::error::Result;
use crate::Chips;
use crate::Utility;
use crate::B_BLIND;
use crate::MAX_RAISE_REPEATS;
use crate::N;
use crate::S_BLIND;
use crate::STACK;

/// the full state of one heads-up hand in between actions.
///
/// seat 0 is the button: posts the small blind, acts first preflop,
/// acts last postflop. immutable methods expose the rules of how the
/// game may proceed; apply/reveal advance it. this is also the CFR
/// node representation.
#[derive(Debug, Clone, Copy)]
pub struct Game {
    seats: [Seat; N],
    board: Hand,
    street: Street,
    pot: Chips,
    actor: usize,
    count: usize,
    raises: usize,
}

impl Game {
    /// blinds posted, hole cards dealt, button to act
    pub fn root(holes: [Hole; 2]) -> Self {
        let mut game = Self {
            seats: [Seat::new(STACK, holes[0]), Seat::new(STACK, holes[1])],
            board: Hand::empty(),
            street: Street::Pref,
            pot: 0,
            actor: 0,
            count: 0,
            raises: 0,
        };
        game.blind(0, S_BLIND);
        game.blind(1, B_BLIND);
        game
    }

    pub fn pot(&self) -> Chips {
        self.pot
    }
    pub fn board(&self) -> Hand {
        self.board
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn actor(&self) -> &Seat {
        &self.seats[self.actor]
    }
    pub fn seat(&self, position: usize) -> &Seat {
        &self.seats[position]
    }
    /// what the player to act can see
    pub fn sweat(&self) -> Observation {
        Observation::from((Hand::from(self.actor().cards()), self.board))
    }

    pub fn turn(&self) -> Turn {
        if self.folded().is_some() || self.street == Street::Show {
            Turn::Terminal
        } else if self.closed() {
            Turn::Chance
        } else {
            Turn::Choice(self.actor)
        }
    }

    /// the abstract actions available at this decision.
    ///
    /// facing a bet: fold, call, and raises; otherwise check and
    /// raises. tagged sizes that land on or above the shove amount
    /// collapse into bMAX, and raising is capped per street.
    pub fn edges(&self) -> Vec<Edge> {
        assert!(self.turn().is_choice());
        let mut edges = Vec::new();
        let call = self.to_call();
        let shove = self.to_shove();
        if call > 0 {
            edges.push(Edge::Fold);
            edges.push(Edge::Call);
        } else {
            edges.push(Edge::Check);
        }
        if shove > call {
            if self.raises < MAX_RAISE_REPEATS {
                let mut seen = call;
                for size in [Size::Min, Size::Mid] {
                    let chips = self.to_raise(size);
                    if chips < shove && chips > seen {
                        edges.push(Edge::Raise(size));
                        seen = chips;
                    }
                }
            }
            edges.push(Edge::Shove);
        }
        edges
    }

    /// resolve an abstract Edge into chips on the table
    pub fn actionize(&self, edge: &Edge) -> Action {
        match edge {
            Edge::Fold => Action::Fold,
            Edge::Check => Action::Check,
            Edge::Call => Action::Call(self.to_call()),
            Edge::Shove => Action::Shove(self.to_shove()),
            Edge::Raise(size) => Action::Raise(self.to_raise(*size)),
        }
    }

    pub fn apply(&self, action: Action) -> Result<Self> {
        let mut next = *self;
        next.act(action)?;
        Ok(next)
    }

    /// advance off a closed street, dealing the given cards.
    /// betting reopens with the big blind, or stays closed when a
    /// player is all in and the runout just plays through.
    pub fn reveal(&self, cards: Hand) -> Self {
        assert!(self.turn().is_chance());
        assert!(cards.size() == self.street.n_revealed());
        let mut next = *self;
        next.board = Hand::add(next.board, cards);
        next.street = next.street.next();
        next.count = 0;
        next.raises = 0;
        next.actor = 1;
        for seat in next.seats.iter_mut() {
            seat.reset_stake();
        }
        next.promote();
        next
    }

    /// signed chip delta from one seat's perspective
    pub fn payoff(&self, position: usize) -> Utility {
        assert!(self.turn().is_terminal());
        log::trace!("settling {}", self);
        Showdown::settle(self)[position].pnl() as Utility
    }

    pub fn folded(&self) -> Option<usize> {
        self.seats.iter().position(|s| s.state() == State::Folding)
    }

    //

    pub fn to_call(&self) -> Chips {
        self.effective_stake() - self.actor().stake()
    }
    pub fn to_shove(&self) -> Chips {
        self.actor().stack()
    }
    /// chips put in now for a tagged raise: the call plus a pot
    /// fraction, floored at a full big blind raise
    pub fn to_raise(&self, size: Size) -> Chips {
        let fraction = match size {
            Size::Min => (self.pot + 2) / 3,
            Size::Mid => self.pot,
        };
        self.to_call() + fraction.max(B_BLIND)
    }

    //

    fn act(&mut self, action: Action) -> Result<()> {
        self.legal(&action)?;
        match action {
            Action::Fold => self.seats[self.actor].fold(),
            Action::Check => {}
            Action::Call(chips) | Action::Raise(chips) | Action::Shove(chips) => {
                self.seats[self.actor].bet(chips);
                self.pot += chips;
            }
        }
        self.count += 1;
        self.raises += action.is_aggro() as usize;
        self.actor = 1 - self.actor;
        self.promote();
        Ok(())
    }

    fn legal(&self, action: &Action) -> Result<()> {
        let illegal = |reason: String| Err(Error::InvalidState(reason));
        if !self.turn().is_choice() {
            return illegal(format!("no decision pending ({})", self.turn()));
        }
        let call = self.to_call();
        let shove = self.to_shove();
        match action {
            Action::Fold if call == 0 => illegal("fold when check is free".to_string()),
            Action::Check if call > 0 => illegal(format!("check facing {}", call)),
            Action::Call(chips) if *chips != call || call == 0 => {
                illegal(format!("call of {} facing {}", chips, call))
            }
            Action::Shove(chips) if *chips != shove => {
                illegal(format!("shove of {} with stack {}", chips, shove))
            }
            Action::Raise(chips) if *chips >= shove => {
                illegal(format!("raise of {} reaches stack {}", chips, shove))
            }
            Action::Raise(chips) if *chips < call + B_BLIND => {
                illegal(format!("raise of {} below minimum", chips))
            }
            _ => Ok(()),
        }
    }

    fn blind(&mut self, position: usize, chips: Chips) {
        self.seats[position].bet(chips);
        self.pot += chips;
    }

    /// river betting closing is the showdown transition
    fn promote(&mut self) {
        if self.street == Street::Rive && self.closed() {
            self.street = Street::Show;
        }
    }

    /// both players have acted since the last bet and the pot is
    /// right, or someone is all in with the pot matched
    fn closed(&self) -> bool {
        let matched = self.seats[0].stake() == self.seats[1].stake();
        let shoving = self.seats.iter().any(|s| s.state() == State::Shoving);
        matched && (self.count >= 2 || shoving)
    }

    fn effective_stake(&self) -> Chips {
        self.seats
            .iter()
            .map(|s| s.stake())
            .max()
            .expect("non-empty seats")
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for seat in self.seats.iter() {
            write!(f, "{} ", seat)?;
        }
        write!(f, "@ {:>4} {} {}", self.pot, self.board, self.street)
    }
}
