//! Engine state management.
//!
//! Holds the game configuration and the current board, and answers the
//! protocol commands the main loop dispatches to it.

use std::io::Write;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::province::{Nation, Province};
use crate::board::state::{Board, Snapshot};
use crate::config::Config;
use crate::error::Result;
use crate::orders;
use crate::protocol::notation::{format_orders, parse_orders};
use crate::resolve::phase;
use crate::variants::{self, Variant};

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub config: Config,
    pub board: Board,
    variant: &'static Variant,
    /// Timestamp handed to the next build or disband.
    clock: u64,
}

impl Engine {
    /// Creates an engine with `config` and its variant's starting position.
    pub fn new(config: Config) -> Result<Self> {
        let variant = variants::lookup(&config.variant)?;
        let board = variant.new_game(&config)?;
        Ok(Engine {
            config,
            board,
            variant,
            clock: 0,
        })
    }

    /// Restarts from the configured variant's starting position.
    pub fn new_game(&mut self) -> Result<()> {
        self.variant = variants::lookup(&self.config.variant)?;
        self.board = self.variant.new_game(&self.config)?;
        self.clock = 0;
        info!("new {} game", self.variant.name);
        Ok(())
    }

    /// Changes one option. Variant and house rule changes apply from the next
    /// `newgame`; house rules also apply to the current board right away.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        self.config.set_option(name, value)?;
        self.board.set_flags(self.config.flags);
        Ok(())
    }

    /// Parses and submits orders. Nothing is submitted if any order fails
    /// to parse or collides with an order already given for its province.
    pub fn submit(&mut self, text: &str) -> Result<()> {
        let orders = parse_orders(text, self.clock)?;
        debug!("submitting {}", format_orders(&orders));
        let count = orders.len() as u64;
        let mut board = self.board.clone();
        for order in orders {
            board.set_order(order.source().clone(), order)?;
        }
        self.board = board;
        self.clock += count;
        Ok(())
    }

    /// Adjudicates the phase and reports each resolution, the new phase
    /// and, if the game is over, the winner. On a fatal error the board is
    /// left as it was before the command.
    pub fn handle_next<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let mut board = self.board.clone();
        match self.config.seed {
            Some(seed) => {
                let mut first: Vec<Province> = board
                    .units()
                    .keys()
                    .chain(board.orders().keys())
                    .cloned()
                    .collect();
                first.sort();
                first.dedup();
                first.shuffle(&mut SmallRng::seed_from_u64(seed));
                board.next_from(&first)?;
            }
            None => board.next()?,
        }
        self.board = board;
        self.handle_resolutions(out)?;
        self.handle_status(out)
    }

    pub fn handle_resolutions<W: Write>(&self, out: &mut W) -> Result<()> {
        for (prov, outcome) in self.board.resolutions() {
            match outcome {
                Ok(()) => writeln!(out, "resolution {} ok", prov)?,
                Err(err) => writeln!(out, "resolution {} {}", prov, err)?,
            }
        }
        for prov in self.board.force_disbands() {
            writeln!(out, "disbanded {}", prov)?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn handle_status<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "phase {}", self.board.phase())?;
        let threshold = self.variant.threshold(&self.config);
        if let Some(winner) = phase::winner(&self.board, threshold) {
            writeln!(out, "winner {}", winner)?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn handle_dump<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "snapshot {}", self.board.dump().to_json()?)?;
        out.flush()?;
        Ok(())
    }

    /// Replaces the board with a snapshot of the configured variant.
    pub fn load(&mut self, json: &str) -> Result<()> {
        let snapshot = Snapshot::from_json(json)?;
        let mut board = (self.variant.blank)(snapshot.phase).with_flags(self.config.flags);
        board.load(snapshot);
        self.board = board;
        Ok(())
    }

    /// Writes every legal order for `nation`, one option path per line.
    pub fn handle_options<W: Write>(&self, nation: &Nation, out: &mut W) -> Result<()> {
        for path in orders::options(&self.board, nation).paths() {
            let words: Vec<String> = path.iter().map(|key| key.to_string()).collect();
            writeln!(out, "option {}", words.join(" "))?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn handle_check<W: Write>(&self, nation: &Nation, out: &mut W) -> Result<()> {
        for report in phase::corroborate(&self.board, nation) {
            let errors: Vec<String> = report.errors.iter().map(|e| e.to_string()).collect();
            match &report.province {
                Some(prov) => writeln!(out, "inconsistency {} {}", prov, errors.join(", "))?,
                None => writeln!(out, "inconsistency - {}", errors.join(", "))?,
            }
        }
        out.flush()?;
        Ok(())
    }

    pub fn handle_messages<W: Write>(&self, nation: &Nation, out: &mut W) -> Result<()> {
        for message in phase::messages(&self.board, nation) {
            writeln!(out, "message {}", message)?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn handle_isready<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "readyok")?;
        out.flush()?;
        Ok(())
    }
}
