// Copyright (C) 2020-2026 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod alphabet;
pub mod board;
pub mod build;
pub mod cross_check;
pub mod display;
pub mod game_config;
pub mod kwg;
pub mod lexicon;
pub mod matrix;
pub mod movegen;
pub mod rack;
pub mod word_finder;
