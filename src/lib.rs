//! # Argot - IRC-log text generator
//!
//! Argot turns Irssi channel logs into a plain-text corpus and generates
//! new text from it by walking a word-aligned suffix array.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`irssi`] - Log line parsing against an ordered table of line shapes
//! - [`corpus`] - Corpus assembly from parsed message entries
//! - [`suffix_array`] - Suffix array building, sorting, phrase search and sampling
//! - [`generator`] - k-word phrase generation with fresh-start fallback
//! - [`commands`] - Drivers for the `extract`, `read` and `generate` subcommands
//! - [`output`] - Summary and generated-text printing
//! - [`utils`] - Word slicing, progress spinners, configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use argot::corpus::Corpus;
//! use argot::generator::{GeneratorConfig, TextGenerator};
//! use argot::suffix_array::SuffixArrayBuilder;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let corpus = Corpus::new("the cat sat on the mat the cat ran").unwrap();
//! let array = SuffixArrayBuilder::with_defaults(&corpus).build();
//!
//! let config = GeneratorConfig::new(12, 2).unwrap();
//! let text = TextGenerator::new(&array, config, StdRng::seed_from_u64(1)).generate();
//! println!("{}", text);
//! ```
//!
//! ## Generation
//!
//! Each step looks up the current k-word phrase with a trailing space, so
//! matches end on a word boundary, then picks one continuation uniformly by
//! reservoir sampling over the matching run of the sorted array. Steps that
//! cannot continue start fresh from a random suffix.

pub mod commands;
pub mod corpus;
pub mod generator;
pub mod irssi;
pub mod output;
pub mod suffix_array;
pub mod utils;
