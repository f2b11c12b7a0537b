//! Integration tests across the layout pipeline
