//! Protocol fixture: exits before answering anything.

fn main() {}
