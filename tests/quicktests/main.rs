//! Properties of the public `Tree` API, checked against plain sorted `Vec`s.

mod tree;
