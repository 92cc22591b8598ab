use cfg_sensitive::{Grammar, GrammarBuilder, Polarity};

/// `S -> A B`, `A -> "a"`, `B -> "b"`, no expectations at all. The simplest
/// possible grammar, useful as a baseline for properties that should hold
/// regardless of context machinery.
pub fn build_ab_grammar() -> Grammar {
    let mut b = GrammarBuilder::new();
    b.add_terminal("a", "a").unwrap();
    b.add_terminal("b", "b").unwrap();
    b.add_substitution("S", &["a", "b"], None, None).unwrap();
    b.build()
}

/// `S -> a A`, `a -> "b"` with a *right* expectation requiring `A`,
/// `A -> B` with a *left* expectation requiring `a`, `B -> "Z"`.
/// `a` can only be completed once something requiring it on the right
/// (`A`) exists, but `A` can only be predicted once `a` exists as left
/// context: neither can go first, so no parse exists ("parallel deadlock").
pub fn build_parallel_deadlock_grammar() -> Grammar {
    let mut g = GrammarBuilder::new();
    g.add_terminal("b_tok", "b").unwrap();
    g.add_terminal("B_tok", "Z").unwrap();
    g.add_substitution("a", &["b_tok"], None, Some((Polarity::Require, "A"))).unwrap();
    g.add_substitution("A", &["B"], Some((Polarity::Require, "a")), None).unwrap();
    g.add_substitution("B", &["B_tok"], None, None).unwrap();
    g.add_substitution("S", &["a", "A"], None, None).unwrap();
    g.build()
}

/// `S -> a A`, `a -> b` where `b`'s own right expectation requires `A`,
/// `A -> B`, `B`'s own left expectation requires `a`. The requirement is
/// pushed one layer further away from the boundary than the parallel-
/// deadlock case ("over-cross deadlock"); still unsatisfiable.
pub fn build_overcross_deadlock_grammar() -> Grammar {
    let mut g = GrammarBuilder::new();
    g.add_terminal("z", "z").unwrap();
    g.add_terminal("cap_z", "Z").unwrap();
    g.add_substitution("b", &["z"], None, Some((Polarity::Require, "A"))).unwrap();
    g.add_substitution("a", &["b"], None, None).unwrap();
    g.add_substitution("C", &["cap_z"], Some((Polarity::Require, "a")), None).unwrap();
    g.add_substitution("B", &["C"], None, None).unwrap();
    g.add_substitution("A", &["B"], None, None).unwrap();
    g.add_substitution("S", &["a", "A"], None, None).unwrap();
    g.build()
}

/// `S -> A B`, `A -> "a"` with a right expectation requiring `B`,
/// `B -> "b"` with a right expectation requiring `A`: each side demands
/// the *other* be its right-brother, which is impossible since only one
/// of them can be rightmost. ("hanging expectation")
pub fn build_hanging_expectation_grammar() -> Grammar {
    let mut g = GrammarBuilder::new();
    g.add_terminal("a_tok", "a").unwrap();
    g.add_terminal("b_tok", "b").unwrap();
    g.add_substitution("A", &["a_tok"], None, Some((Polarity::Require, "B"))).unwrap();
    g.add_substitution("B", &["b_tok"], None, Some((Polarity::Require, "A"))).unwrap();
    g.add_substitution("S", &["A", "B"], None, None).unwrap();
    g.build()
}

/// The classic `a^n b^n c^n` context-sensitive grammar:
/// `S -> a S B C | a B C`, `B -> "b"` gated on a left neighbor of `a` or
/// `b`, `C -> "c"` gated on a left neighbor of `b` or `c`.
pub fn build_abc_grammar() -> Grammar {
    let mut g = GrammarBuilder::new();
    g.add_terminal("a_tok", "a").unwrap();
    g.add_terminal("b_tok", "b").unwrap();
    g.add_terminal("c_tok", "c").unwrap();
    g.add_substitution("B", &["b_tok"], Some((Polarity::Require, "a")), None).unwrap();
    g.add_substitution("B", &["b_tok"], Some((Polarity::Require, "b")), None).unwrap();
    g.add_substitution("C", &["c_tok"], Some((Polarity::Require, "b")), None).unwrap();
    g.add_substitution("C", &["c_tok"], Some((Polarity::Require, "c")), None).unwrap();
    g.add_substitution("S", &["a_tok", "S", "B", "C"], None, None).unwrap();
    g.add_substitution("S", &["a_tok", "B", "C"], None, None).unwrap();
    g.build()
}

/// `S -> A B C D`, where each of `A`/`B`/`C`/`D` is also reachable through a
/// unit wrapper (`AW`/`BW`/`CW`) gated by a left expectation on the previous
/// sibling's wrapper: `B` requires `AW` to its left, `C` requires `BW`, `D`
/// requires `CW` — every wrapped route collapses onto the same canonical
/// match, so exactly one solution survives cyclic-renaming rejection.
pub fn build_upcycle_grammar() -> Grammar {
    let mut g = GrammarBuilder::new();
    g.add_terminal("a", "a").unwrap();
    g.add_terminal("b", "b").unwrap();
    g.add_terminal("c", "c").unwrap();
    g.add_terminal("d", "d").unwrap();
    g.add_substitution("S", &["A", "B", "C", "D"], None, None).unwrap();
    g.add_substitution("A", &["a"], None, None).unwrap();
    g.add_substitution("B", &["b"], Some((Polarity::Require, "AW")), None).unwrap();
    g.add_substitution("AW", &["A"], None, None).unwrap();
    g.add_substitution("A", &["AW"], None, None).unwrap();
    g.add_substitution("C", &["c"], Some((Polarity::Require, "BW")), None).unwrap();
    g.add_substitution("BW", &["B"], None, None).unwrap();
    g.add_substitution("B", &["BW"], None, None).unwrap();
    g.add_substitution("D", &["d"], Some((Polarity::Require, "CW")), None).unwrap();
    g.add_substitution("CW", &["C"], None, None).unwrap();
    g.add_substitution("C", &["CW"], None, None).unwrap();
    g.build()
}

/// Like [`build_upcycle_grammar`], but the wrapping is routed through a
/// *right* expectation on `A` and a *left* expectation on `C`, both pointing
/// at the same `B`: wide enough that the wrapped and unwrapped routes to `B`
/// stay distinct instead of collapsing, producing several surviving
/// solutions rather than exactly one.
pub fn build_wide_upcycle_grammar() -> Grammar {
    let mut g = GrammarBuilder::new();
    g.add_terminal("a", "a").unwrap();
    g.add_terminal("b", "b").unwrap();
    g.add_terminal("c", "c").unwrap();
    g.add_substitution("S", &["A", "B", "C"], None, None).unwrap();
    g.add_substitution("A", &["a"], None, None).unwrap();
    g.add_substitution("B", &["b"], None, None).unwrap();
    g.add_substitution("C", &["c"], None, None).unwrap();
    g.add_substitution("A", &["AW"], None, Some((Polarity::Require, "B"))).unwrap();
    g.add_substitution("B", &["BW"], None, None).unwrap();
    g.add_substitution("C", &["CW"], Some((Polarity::Require, "B")), None).unwrap();
    g.add_substitution("AW", &["A"], None, None).unwrap();
    g.add_substitution("BW", &["B"], None, None).unwrap();
    g.add_substitution("CW", &["C"], None, None).unwrap();
    g.build()
}

/// `S -> A B`, `A -> "a"` with a *left* expectation requiring `B` (nothing
/// precedes `A`, so this can never be witnessed), `B -> "b"` with a
/// *right* expectation requiring `A` (nothing follows `B`, likewise
/// unwitnessable): a boundary-driven deadlock distinct from the
/// parallel/over-cross cases above, which both fail through an
/// unreachable fixpoint rather than an unreachable boundary.
pub fn build_sidecross_deadlock_grammar() -> Grammar {
    let mut g = GrammarBuilder::new();
    g.add_terminal("a_tok", "a").unwrap();
    g.add_terminal("b_tok", "b").unwrap();
    g.add_substitution("A", &["a_tok"], Some((Polarity::Require, "B")), None).unwrap();
    g.add_substitution("B", &["b_tok"], None, Some((Polarity::Require, "A"))).unwrap();
    g.add_substitution("S", &["A", "B"], None, None).unwrap();
    g.build()
}

/// Two independent start symbols producing the same span: an unambiguous
/// grammar when `expect` pins one of them, ambiguous (2 solutions) when
/// `expect` is left unset.
pub fn build_ambiguous_roots_grammar() -> Grammar {
    let mut g = GrammarBuilder::new();
    g.add_terminal("a_tok", "a").unwrap();
    g.add_terminal("b_tok", "b").unwrap();
    g.add_terminal("c_tok", "c").unwrap();
    g.add_substitution("A", &["a_tok"], None, None).unwrap();
    g.add_substitution("B", &["b_tok"], None, None).unwrap();
    g.add_substitution("C", &["c_tok"], None, None).unwrap();
    g.add_substitution("R", &["B", "C"], None, None).unwrap();
    g.add_substitution("S1", &["A", "B", "C"], None, None).unwrap();
    g.add_substitution("S2", &["A", "R"], None, None).unwrap();
    g.build()
}
