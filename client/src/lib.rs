#![warn(missing_docs)]
/*!
Client library for the signal pool program.

## Overview

A signal pool is a program-owned fund holding a list of token assets. Anyone can buy into a pool by
depositing a share of every asset it holds, in exchange for pool tokens, and later redeem these pool tokens.
The pool's signal provider trades the pool assets on a set of authorized order book markets.

This crate does not submit anything. It provides:

- the [`instruction`] encoders for every pool instruction, each with its positional account list,
- the [`state`] parsers for the pool and order tracker accounts,
- the [`address`] derivations of pools, pool token mints and order trackers,
- a [`PoolClient`][`orchestrator::PoolClient`] which reads the ledger through a [`Ledger`][`ledger::Ledger`]
and the order book venue through a [`Venue`][`venue::Venue`], and assembles the ordered instruction lists of
every workflow.

## Pool creation

[`create_pool`][`orchestrator::PoolClient::create_pool`] searches a random pool seed, then returns the
`init` instruction, the creation of the missing token accounts and the `create` instruction. The returned
seed identifies the pool in every later workflow.

## Trading

[`create_order`][`orchestrator::PoolClient::create_order`] references the market and the pool assets by their
index in the pool account, which is read again for every call. Indices are never cached as the pool account
can change between two transactions.
*/

pub mod address;
pub mod codec;
pub mod config;
pub mod error;
pub mod instruction;
pub mod ledger;
pub mod orchestrator;
pub mod state;
pub mod venue;

pub use orchestrator::PoolClient;
