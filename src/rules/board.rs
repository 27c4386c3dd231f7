//! The Regicide board: the complete game state and its transition function.
//!
//! ## Turn order
//!
//! Whose turn it is comes from the action log alone. The first player opens;
//! after a boss falls the same player leads against the next one; otherwise
//! play passes to the next seat.
//!
//! ## Resolving a play
//!
//! 1. Move the cards from hand to the player's `played` buffer.
//! 2. Apply the boss's own suit effects (Spades shield, Clubs double) and
//!    subtract the damage.
//! 3. Apply Hearts then Diamonds against the board, unless the boss shares
//!    the suit.
//! 4. If the boss fell, sweep every `played` buffer into the discard, send
//!    the boss card to the tavern overlay (perfect hit) or the discard, and
//!    reveal the next boss. Otherwise the boss strikes back.
//!
//! All randomness flows through the `GameRng` passed in; the board owns none.

use im::Vector;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::combos::{can_yield, is_legal_combo, legal_plays};
use super::outcome::Outcome;
use super::powers::{apply_diamonds, apply_hearts};
use crate::cards::{Boss, Card, Suit};
use crate::core::action::{ActionRecord, Move};
use crate::core::config::GameConfig;
use crate::core::error::{Error, Result};
use crate::core::player::{AutoDiscard, DamageOutcome, DiscardPolicy, Player, PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::zones::{Castle, Discard, Tavern};

/// Full game state. Cloning is cheap enough to do once per search iteration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub(crate) config: GameConfig,
    pub(crate) players: PlayerMap<Player>,
    pub(crate) castle: Castle,
    pub(crate) tavern: Tavern,
    pub(crate) discard: Discard,
    pub(crate) actions: Vector<ActionRecord>,
    pub(crate) consecutive_yields: u32,
}

impl Board {
    /// Set up a fresh game: build the piles, deal hands, reveal the first boss.
    pub fn start<S: Into<String>>(
        player_count: usize,
        names: impl IntoIterator<Item = S>,
        rng: &mut GameRng,
    ) -> Result<Self> {
        let config = GameConfig::for_players(player_count)?;
        let mut players: Vec<Player> = names.into_iter().map(Player::new).collect();
        if players.len() != player_count {
            return Err(Error::InvalidArgument(format!(
                "expected {player_count} player names, got {}",
                players.len()
            )));
        }

        let mut castle = Castle::create(rng)?;
        let mut tavern = Tavern::create(rng)?;
        for player in &mut players {
            for _ in 0..config.hand_size {
                player.hand.push(tavern.draw()?);
            }
        }
        let boss = castle.draw_boss()?;
        debug!("game start: {player_count} players, first boss {}", boss.card());

        Ok(Self {
            config,
            players: PlayerMap::from_vec(players),
            castle,
            tavern,
            discard: Discard::default(),
            actions: Vector::new(),
            consecutive_yields: 0,
        })
    }

    /// Start a game with seats named "Player 1", "Player 2", ...
    pub fn start_default(player_count: usize, rng: &mut GameRng) -> Result<Self> {
        Self::start(player_count, (1..=player_count).map(|i| format!("Player {i}")), rng)
    }

    /// Assemble an arbitrary position with an empty action log.
    pub fn from_parts(
        players: Vec<Player>,
        castle: Castle,
        tavern: Tavern,
        discard: Discard,
    ) -> Result<Self> {
        let config = GameConfig::for_players(players.len())?;
        Ok(Self {
            config,
            players: PlayerMap::from_vec(players),
            castle,
            tavern,
            discard,
            actions: Vector::new(),
            consecutive_yields: 0,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.config
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.config.hand_size
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    /// # Panics
    ///
    /// Panics if `id` is not seated at this table.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    #[must_use]
    pub fn castle(&self) -> &Castle {
        &self.castle
    }

    #[must_use]
    pub fn boss(&self) -> Option<&Boss> {
        self.castle.boss()
    }

    #[must_use]
    pub fn tavern(&self) -> &Tavern {
        &self.tavern
    }

    #[must_use]
    pub fn discard(&self) -> &Discard {
        &self.discard
    }

    #[must_use]
    pub fn actions(&self) -> &Vector<ActionRecord> {
        &self.actions
    }

    #[must_use]
    pub fn consecutive_yields(&self) -> u32 {
        self.consecutive_yields
    }

    /// Bosses felled so far, counted from the log.
    #[must_use]
    pub fn bosses_defeated(&self) -> usize {
        self.actions.iter().filter(|a| a.boss_defeated).count()
    }

    // === Turn order and moves ===

    /// Seat to move next.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        match self.actions.last() {
            None => PlayerId::new(0),
            Some(last) if last.boss_defeated => last.actor,
            Some(last) => last.actor.next(self.player_count()),
        }
    }

    /// Legal moves for an arbitrary hand given the current yield count.
    #[must_use]
    pub fn legal_plays(&self, hand: &[Card]) -> Vec<Move> {
        legal_plays(hand, self.consecutive_yields, self.player_count())
    }

    /// Legal moves for the player to act.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        self.legal_plays(&self.players[self.current_player()].hand)
    }

    /// Apply `mv` for the current player, discarding with `AutoDiscard`.
    pub fn next_state(&mut self, mv: &Move, rng: &mut GameRng) -> Result<()> {
        self.next_state_with(mv, &mut AutoDiscard, rng)
    }

    /// Apply `mv` for the current player.
    ///
    /// The move is validated before anything changes, so an illegal move
    /// leaves the board untouched. A `policy` that picks a card outside the
    /// hand fails after the play has resolved.
    pub fn next_state_with(
        &mut self,
        mv: &Move,
        policy: &mut dyn DiscardPolicy,
        rng: &mut GameRng,
    ) -> Result<()> {
        let actor = self.current_player();
        self.validate(actor, mv)?;

        let record = match mv {
            Move::Yield => {
                self.consecutive_yields += 1;
                let attack = self.boss_attack()?;
                let died = self.absorb(actor, attack, policy, rng)?;
                ActionRecord::new(actor, Move::Yield, false, died)
            }
            Move::Play(cards) => {
                for &card in cards {
                    self.players[actor].set_card_to_played(card)?;
                }
                self.consecutive_yields = 0;

                let boss_suit = self.castle.boss().map(Boss::suit).ok_or_else(no_boss)?;
                let perfect = self.castle.strike(cards)?;
                self.resolve_powers(actor, mv, boss_suit, rng)?;

                let defeated = self.castle.boss().is_some_and(Boss::is_defeated);
                if defeated {
                    self.defeat_boss(perfect)?;
                    ActionRecord::new(actor, mv.clone(), true, false)
                } else {
                    let attack = self.boss_attack()?;
                    let died = self.absorb(actor, attack, policy, rng)?;
                    ActionRecord::new(actor, mv.clone(), false, died)
                }
            }
        };

        trace!(
            "{actor} played {} (boss defeated: {}, died: {})",
            record.play,
            record.boss_defeated,
            record.player_died
        );
        self.actions.push_back(record);
        Ok(())
    }

    /// Status after the most recent action.
    ///
    /// Checks run in order and later ones override earlier ones, so a boss
    /// kill outranks an empty hand revealed by the next boss.
    #[must_use]
    pub fn winner(&self) -> Outcome {
        let Some(last) = self.actions.last() else {
            return Outcome::Alive;
        };

        let mut result = Outcome::Alive;
        if last.player_died {
            result = Outcome::Loss;
        }
        if let Some(boss) = self.castle.boss() {
            if boss.attack() != 0 && self.players.values().any(|p| p.hand.is_empty()) {
                result = Outcome::Loss;
            }
        }
        if last.boss_defeated {
            result = Outcome::BossDefeated;
            if self.castle.is_empty() && self.castle.boss().is_none() {
                result = Outcome::Win;
            }
        }
        result
    }

    /// Every card on the board, sorted. A complete game always holds the
    /// 52-card deck exactly once.
    #[must_use]
    pub fn card_census(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = Vec::with_capacity(52);
        for player in self.players.values() {
            cards.extend(&player.hand);
            cards.extend(&player.played);
        }
        cards.extend(self.tavern.main_stack());
        cards.extend(self.tavern.overlay());
        cards.extend(self.discard.cards());
        cards.extend(self.castle.remaining());
        cards.extend(self.castle.boss().map(Boss::card));
        cards.sort();
        cards
    }

    // === Internals ===

    fn validate(&self, actor: PlayerId, mv: &Move) -> Result<()> {
        if self.castle.boss().is_none() {
            return Err(no_boss());
        }
        match mv {
            Move::Yield => {
                if !can_yield(self.consecutive_yields, self.player_count()) {
                    return Err(Error::IllegalMove(
                        "cannot yield after every other player has yielded".into(),
                    ));
                }
            }
            Move::Play(cards) => {
                let hand = &self.players[actor].hand;
                if let Some(card) = cards.iter().find(|c| !hand.contains(c)) {
                    return Err(Error::IllegalMove(format!("{card} is not in {actor}'s hand")));
                }
                let mut distinct = cards.to_vec();
                distinct.sort();
                distinct.dedup();
                if distinct.len() != cards.len() || !is_legal_combo(cards) {
                    return Err(Error::IllegalMove(format!("{mv} is not a legal combination")));
                }
            }
        }
        Ok(())
    }

    fn boss_attack(&self) -> Result<u32> {
        self.castle.boss().map(Boss::attack).ok_or_else(no_boss)
    }

    fn resolve_powers(
        &mut self,
        actor: PlayerId,
        mv: &Move,
        boss_suit: Suit,
        rng: &mut GameRng,
    ) -> Result<()> {
        let power = mv.total_rank();
        if mv.has_suit(Suit::Hearts) && boss_suit != Suit::Hearts {
            let moved = apply_hearts(&mut self.discard, &mut self.tavern, power, rng)?;
            trace!("hearts healed {moved} cards into the tavern");
        }
        if mv.has_suit(Suit::Diamonds) && boss_suit != Suit::Diamonds {
            let hand_size = self.hand_size();
            let drawn = apply_diamonds(&mut self.players, &mut self.tavern, actor, power, hand_size)?;
            trace!("diamonds dealt {drawn} cards");
        }
        Ok(())
    }

    fn defeat_boss(&mut self, perfect: bool) -> Result<()> {
        for (_, player) in self.players.iter_mut() {
            if !player.played.is_empty() {
                self.discard.add_cards(std::mem::take(&mut player.played))?;
            }
        }

        let boss = self.castle.take_boss()?;
        if perfect {
            self.tavern.add_boss(boss.card())?;
        } else {
            self.discard.add_cards([boss.card()])?;
        }
        debug!("boss {} defeated (perfect: {perfect})", boss.card());

        if !self.castle.is_empty() {
            let next = self.castle.draw_boss()?;
            debug!("next boss {}", next.card());
        }
        Ok(())
    }

    /// Returns whether the player died.
    fn absorb(
        &mut self,
        actor: PlayerId,
        attack: u32,
        policy: &mut dyn DiscardPolicy,
        rng: &mut GameRng,
    ) -> Result<bool> {
        match self.players[actor].take_damage(attack, policy, rng)? {
            DamageOutcome::Absorbed(discarded) => {
                if !discarded.is_empty() {
                    self.discard.add_cards(discarded)?;
                }
                Ok(false)
            }
            DamageOutcome::Died => {
                debug!("{actor} could not absorb {attack} damage");
                Ok(true)
            }
        }
    }
}

fn no_boss() -> Error {
    Error::InvalidState("no boss in play".into())
}
