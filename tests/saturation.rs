//! End-to-end saturation scenarios and the cross-module properties module-level tests don't
//! already cover (substitution correctness, match-implies-instance, subsumption transitivity).

use ladr_core::binding::{BindingContext, Multiplier, Trail, MAX_VARS};
use ladr_core::builder;
use ladr_core::config::Config;
use ladr_core::context::Context;
use ladr_core::db::clause::Literal;
use ladr_core::db::clist::ListName;
use ladr_core::justify::Primary;
use ladr_core::procedures::{integrate, simplify, solve};
use ladr_core::reports::Report;
use ladr_core::subsume::subsumes;
use ladr_core::symbol::SymbolTable;
use ladr_core::term::TermArena;
use ladr_core::unify::matching::match_term;
use ladr_core::unify::{instantiate, unify};

// --- Property 2: substitution correctness after unify -----------------------------------------

#[test]
fn unified_terms_apply_to_the_same_instance() {
    let mut syms = SymbolTable::new();
    let f = syms.intern("f", 2, false).unwrap();
    let a = syms.intern("a", 0, false).unwrap();
    let b = syms.intern("b", 0, false).unwrap();

    let mut arena = TermArena::new();
    // t1 = f(x, a) under ctx0, t2 = f(b, y) under ctx1.
    let x = arena.make_var(0);
    let ta = arena.make_rigid(a, vec![]);
    let t1 = arena.make_rigid(f, vec![x, ta]);

    let tb = arena.make_rigid(b, vec![]);
    let y = arena.make_var(0);
    let t2 = arena.make_rigid(f, vec![tb, y]);

    let mut contexts = vec![BindingContext::new(Multiplier(0)), BindingContext::new(Multiplier(1))];
    let mut trail = Trail::new();

    unify(&arena, &mut contexts, &mut trail, t1, Multiplier(0), t2, Multiplier(1)).unwrap();

    let i1 = instantiate(&mut arena, &contexts, t1, Multiplier(0), MAX_VARS);
    let i2 = instantiate(&mut arena, &contexts, t2, Multiplier(1), MAX_VARS);
    assert!(arena.term_ident(i1, i2));

    // Both instances are f(b, a).
    let expect_b = arena.make_rigid(b, vec![]);
    let expect_a = arena.make_rigid(a, vec![]);
    let expect = arena.make_rigid(f, vec![expect_b, expect_a]);
    assert!(arena.term_ident(i1, expect));
}

// --- Property 3: match implies instance ---------------------------------------------------------

#[test]
fn a_successful_match_reproduces_the_subject_when_applied_to_the_pattern() {
    let mut syms = SymbolTable::new();
    let f = syms.intern("f", 2, false).unwrap();
    let a = syms.intern("a", 0, false).unwrap();
    let b = syms.intern("b", 0, false).unwrap();

    let mut arena = TermArena::new();
    let x = arena.make_var(0);
    let y = arena.make_var(1);
    let pattern = arena.make_rigid(f, vec![x, y]);

    let ta = arena.make_rigid(a, vec![]);
    let tb = arena.make_rigid(b, vec![]);
    let subject = arena.make_rigid(f, vec![ta, tb]);

    let mut contexts = vec![BindingContext::new(Multiplier(0)), BindingContext::new(Multiplier(1))];
    let mut trail = Trail::new();

    match_term(&arena, &mut contexts, &mut trail, pattern, Multiplier(0), subject, Multiplier(1)).unwrap();

    let applied = instantiate(&mut arena, &contexts, pattern, Multiplier(0), MAX_VARS);
    assert!(arena.term_ident(applied, subject));
}

#[test]
fn a_rigid_pattern_never_matches_a_bare_subject_variable() {
    let mut syms = SymbolTable::new();
    let f = syms.intern("f", 1, false).unwrap();
    let a = syms.intern("a", 0, false).unwrap();

    let mut arena = TermArena::new();
    let ta = arena.make_rigid(a, vec![]);
    let pattern = arena.make_rigid(f, vec![ta]);
    let subject = arena.make_var(0);

    let mut contexts = vec![BindingContext::new(Multiplier(0)), BindingContext::new(Multiplier(1))];
    let mut trail = Trail::new();
    assert!(match_term(&arena, &mut contexts, &mut trail, pattern, Multiplier(0), subject, Multiplier(1)).is_err());
}

// --- Property 10: subsumption transitivity -------------------------------------------------------

#[test]
fn subsumption_is_transitive() {
    let mut syms = SymbolTable::new();
    let p = syms.intern("p", 1, true).unwrap();
    let q = syms.intern("q", 1, true).unwrap();
    let r = syms.intern("r", 1, true).unwrap();
    let a = syms.intern("a", 0, false).unwrap();
    let b = syms.intern("b", 0, false).unwrap();
    let c = syms.intern("c", 0, false).unwrap();

    let mut arena = TermArena::new();
    let x = arena.make_var(0);
    let px = arena.make_rigid(p, vec![x]);
    let c1 = vec![Literal::new(true, px)];

    let ta = arena.make_rigid(a, vec![]);
    let tb = arena.make_rigid(b, vec![]);
    let pa = arena.make_rigid(p, vec![ta]);
    let qb = arena.make_rigid(q, vec![tb]);
    let c2 = vec![Literal::new(true, pa), Literal::new(true, qb)];

    let ta2 = arena.make_rigid(a, vec![]);
    let tb2 = arena.make_rigid(b, vec![]);
    let tc = arena.make_rigid(c, vec![]);
    let pa2 = arena.make_rigid(p, vec![ta2]);
    let qb2 = arena.make_rigid(q, vec![tb2]);
    let rc = arena.make_rigid(r, vec![tc]);
    let c3 = vec![Literal::new(true, pa2), Literal::new(true, qb2), Literal::new(true, rc)];

    let fresh_contexts = || vec![BindingContext::new(Multiplier(0)), BindingContext::new(Multiplier(1))];

    let mut contexts = fresh_contexts();
    let mut trail = Trail::new();
    let c1_subsumes_c2 = subsumes(&mut arena, &mut contexts, &mut trail, &c1, Multiplier(0), &c2, Multiplier(1));

    let mut contexts = fresh_contexts();
    let mut trail = Trail::new();
    let c2_subsumes_c3 = subsumes(&mut arena, &mut contexts, &mut trail, &c2, Multiplier(0), &c3, Multiplier(1));

    let mut contexts = fresh_contexts();
    let mut trail = Trail::new();
    let c1_subsumes_c3 = subsumes(&mut arena, &mut contexts, &mut trail, &c1, Multiplier(0), &c3, Multiplier(1));

    assert!(c1_subsumes_c2);
    assert!(c2_subsumes_c3);
    assert!(c1_subsumes_c3);
}

// --- Trivial equational-chain refutation ---------------------------------------------------------
//
// a=b, b=c, and the denial a≠c: the denial is never itself demodulated into a contradiction until
// forward_simplify rewrites it mid-loop, which is exactly the gap fixed in
// `procedures::simplify::forward_simplify` (see DESIGN.md's clause-store section).

#[test]
fn a_chain_of_equalities_refutes_its_own_denial() {
    let mut ctx = Context::new(Config::default());
    let eq = ctx.symbols.intern_equality();
    let a = ctx.fresh_symbol("a", 0, false).unwrap();
    let b = ctx.fresh_symbol("b", 0, false).unwrap();
    let c = ctx.fresh_symbol("c", 0, false).unwrap();
    ctx.symbols.set_precedence(a, 2);
    ctx.symbols.set_precedence(b, 1);
    ctx.symbols.set_precedence(c, 0);

    let ta = ctx.make_term(a, vec![]);
    let tb = ctx.make_term(b, vec![]);
    let ab = ctx.make_term(eq, vec![ta, tb]);
    builder::load_axiom(&mut ctx, vec![Literal::new(true, ab)]).unwrap();

    let tb2 = ctx.make_term(b, vec![]);
    let tc = ctx.make_term(c, vec![]);
    let bc = ctx.make_term(eq, vec![tb2, tc]);
    builder::load_axiom(&mut ctx, vec![Literal::new(true, bc)]).unwrap();

    let ta2 = ctx.make_term(a, vec![]);
    let tc2 = ctx.make_term(c, vec![]);
    let ac = ctx.make_term(eq, vec![ta2, tc2]);
    builder::load_denial(&mut ctx, vec![Literal::new(false, ac)]).unwrap();

    let report = ctx.solve();
    assert!(matches!(report, Report::Proof(_)), "expected a refutation, got {report:?}");
}

// --- Propositional pigeonhole refutation (3 pigeons, 2 holes) --------------------------------

#[test]
fn pigeonhole_three_into_two_is_refuted() {
    let mut ctx = Context::new(Config::default());

    // p[i][j]: pigeon i is in hole j, i in 0..3, j in 0..2.
    let mut p = Vec::with_capacity(3);
    for i in 0..3 {
        let mut row = Vec::with_capacity(2);
        for j in 0..2 {
            row.push(ctx.fresh_symbol(&format!("p{i}{j}"), 0, true).unwrap());
        }
        p.push(row);
    }

    // Every pigeon is in some hole.
    for i in 0..3 {
        let literals: Vec<Literal> = (0..2).map(|j| Literal::new(true, ctx.make_term(p[i][j], vec![]))).collect();
        builder::load_axiom(&mut ctx, literals).unwrap();
    }

    // No hole holds two pigeons.
    for j in 0..2 {
        for i in 0..3 {
            for k in (i + 1)..3 {
                let lit_i = Literal::new(false, ctx.make_term(p[i][j], vec![]));
                let lit_k = Literal::new(false, ctx.make_term(p[k][j], vec![]));
                builder::load_axiom(&mut ctx, vec![lit_i, lit_k]).unwrap();
            }
        }
    }

    let report = ctx.solve();
    assert!(matches!(report, Report::Proof(_)), "expected pigeonhole to be refuted, got {report:?}");
}

// --- Hint-guided weight override ----------------------------------------------------------------

#[test]
fn a_clause_subsumed_by_a_hint_is_scheduled_with_the_hints_weight_and_labels() {
    let mut ctx = Context::new(Config::default());
    let p = ctx.fresh_symbol("p", 1, true).unwrap();
    let a = ctx.fresh_symbol("a", 0, false).unwrap();

    let hx = ctx.arena.make_var(0);
    let hint_atom = ctx.make_term(p, vec![hx]);
    builder::load_hint(&mut ctx, vec![Literal::new(true, hint_atom)], Some(0), vec!["short-cut".to_string()]).unwrap();

    let ta = ctx.arena.make_rigid(a, vec![]);
    let pa = ctx.make_term(p, vec![ta]);
    let candidate = ctx.add_clause(vec![Literal::new(true, pa)], Primary::Input).unwrap();

    solve::schedule(&mut ctx, candidate).unwrap();

    let clause = ctx.clauses.get(candidate).unwrap();
    assert_eq!(clause.bsub_weight(), Some(0));
    assert!(clause.attributes.iter().any(|a| matches!(a, ladr_core::db::clause::Attribute::Label(l) if l == "short-cut")));
    assert!(clause.memberships().any(|l| *l == ListName::Passive));
}

// --- Back-demodulation resimplification -----------------------------------------------------

#[test]
fn integrating_a_demodulator_back_rewrites_an_active_clause() {
    let mut ctx = Context::new(Config::default());
    let eq = ctx.symbols.intern_equality();
    let g = ctx.fresh_symbol("g", 1, false).unwrap();
    let b = ctx.fresh_symbol("b", 0, false).unwrap();
    let d = ctx.fresh_symbol("d", 0, false).unwrap();
    let c = ctx.fresh_symbol("c", 0, false).unwrap();
    ctx.symbols.set_precedence(b, 1);
    ctx.symbols.set_precedence(d, 0);
    ctx.symbols.set_precedence(g, 2);
    ctx.symbols.set_precedence(c, 0);

    // b = d, oriented b -> d, integrated as a demodulator.
    let tb = ctx.make_term(b, vec![]);
    let td = ctx.make_term(d, vec![]);
    let bd = ctx.make_term(eq, vec![tb, td]);
    let demod_id = ctx.add_clause(vec![Literal::new(true, bd)], Primary::Input).unwrap();
    integrate::integrate(&mut ctx, demod_id).unwrap();
    assert_eq!(ctx.demodulators.iter().count(), 1);

    // g(b) = c, already active (usable).
    let inner_b = ctx.make_term(b, vec![]);
    let gb = ctx.make_term(g, vec![inner_b]);
    let tc = ctx.make_term(c, vec![]);
    let gbc = ctx.make_term(eq, vec![gb, tc]);
    let target = ctx.add_clause(vec![Literal::new(true, gbc)], Primary::Input).unwrap();
    integrate::integrate(&mut ctx, target).unwrap();

    let touched = simplify::back_demod(&mut ctx, &[target]).unwrap();
    assert_eq!(touched, vec![target]);

    let rewritten_atom = ctx.clauses.get(target).unwrap().literals[0].atom;
    let has_back_rewrite_cell = matches!(
        ctx.clauses.get(target).unwrap().justification.primary,
        ladr_core::justify::Primary::BackRewrite { parent, .. } if parent == target
    );

    let inner_d = ctx.make_term(d, vec![]);
    let gd = ctx.make_term(g, vec![inner_d]);
    let tc2 = ctx.make_term(c, vec![]);
    let expect = ctx.make_term(eq, vec![gd, tc2]);
    assert!(ctx.arena.term_ident(rewritten_atom, expect));
    assert!(has_back_rewrite_cell);
}
