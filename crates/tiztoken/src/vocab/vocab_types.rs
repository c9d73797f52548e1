//! # Vocabulary Types

use crate::types::{Pair, TTHashMap};

/// `{ Pair<T> -> T}` map.
///
/// ## Style Hints
/// Instance names should prefer `pair_tokens`, or `pair_token_map`.
pub type PairTokenMap<T> = TTHashMap<Pair<T>, T>;

/// `{ Vec<u8> -> T }` map.
///
/// ## Style Hints
/// Instance names should prefer `span_map`, or `span_token_map`.
pub type SpanTokenMap<T> = TTHashMap<Vec<u8>, T>;

/// `{ T -> Vec<u8> }` map.
///
/// ## Style Hints
/// Instance names should prefer `token_spans`, or `spans`.
pub type TokenSpanMap<T> = TTHashMap<T, Vec<u8>>;

/// `{ T -> u8 }` map.
///
/// ## Style Hints
/// Instance names should prefer `token_bytes`, or `token_byte_map`.
pub type TokenByteMap<T> = TTHashMap<T, u8>;

/// `[T; 256]` array.
///
/// ## Style Hints
/// Instance names should prefer `byte_tokens`, or `byte_token_array`.
pub type ByteTokenArray<T> = [T; 256];
