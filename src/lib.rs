//! Jump-run record tracking for Urban Terror servers.
//!
//! This crate implements the logic of the B3 "jumper" plugin: it keeps the
//! best time of every player on every waypoint of a map, announces personal
//! and map records, manages server-side demos of record runs, and answers
//! the `jmp*` chat commands.
//!
//! The game server and the admin framework are not part of this crate; they
//! are described by the traits in [`game`], which a host adapter implements.

/*
 * Jumper - jump-run records for Urban Terror.
 * Copyright (C) 2024  Jumper contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see https://www.gnu.org/licenses.
 */

#[macro_use(Debug, Display, From, Into, Error)]
extern crate derive_more as _;

#[macro_use]
extern crate tracing as _;

#[macro_use]
mod macros;

#[cfg(test)]
mod testing;

pub mod config;
pub use config::Config;

pub mod database;
pub use database::Database;

pub mod time;
pub mod players;
pub mod maps;
pub mod records;
pub mod demos;
pub mod game;
pub mod commands;

pub mod plugin;
pub use plugin::Jumper;
