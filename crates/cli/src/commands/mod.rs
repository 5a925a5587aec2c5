// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod formats;
pub mod generate;
pub mod suite;
pub mod verify;
