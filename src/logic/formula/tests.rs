use super::*;
use crate::testing::strategies::{class_code, count, mix_word};
use crate::testing::{assert_decodes_to, assert_round_trip, assert_unparseable};
use proptest::prelude::*;

fn literal() -> FormulaEncoder {
    FormulaEncoder::new(EncodeConfig::literal())
}

// ===== Encoding, one case per mode =====
#[test]
fn encode_single() {
    assert_eq!(literal().encode(FormulaMode::Single, &["ABC"], &[]).unwrap(), "ABC/TX");
    assert_eq!(encode(FormulaMode::Single, &["ABC"], &[]).unwrap(), "(ABC+ＡＢＣ)/TX");
}

#[test]
fn encode_pair() {
    assert_eq!(
        literal().encode(FormulaMode::Pair, &["A", "B"], &["30"]).unwrap(),
        "A,30N,B/TX"
    );
}

#[test]
fn encode_serial_reuses_the_count() {
    assert_eq!(
        literal()
            .encode(FormulaMode::SerialTriple, &["A", "B", "C"], &["5"])
            .unwrap(),
        "{A,5N,B,5N,C}/TX"
    );
}

#[test]
fn encode_collection() {
    assert_eq!(
        literal()
            .encode(FormulaMode::CollectionTriple, &["A", "B", "C"], &["7"])
            .unwrap(),
        "{A,B,C},7N/TX"
    );
}

#[test]
fn encode_parallel() {
    assert_eq!(
        literal()
            .encode(FormulaMode::ParallelTriple, &["A", "B", "C"], &["2"])
            .unwrap(),
        "[A/TX+B,2N,C/TX]"
    );
    assert_eq!(
        encode(FormulaMode::ParallelTriple, &["A", "半導体", "C"], &["2"]).unwrap(),
        "[(A+Ａ)/TX+半導体,2N,(C+Ｃ)/TX]"
    );
}

#[test]
fn encode_classification_wraps_joined_codes() {
    assert_eq!(
        encode(FormulaMode::Classification, &["H04W12/08"], &[]).unwrap(),
        "[H04W12/08/FT+H04W12/08/CP]"
    );
    assert_eq!(
        encode(FormulaMode::Classification, &["H04W12/08+H04W72/12"], &[]).unwrap(),
        "[(H04W12/08+H04W72/12)/FT+(H04W12/08+H04W72/12)/CP]"
    );
    assert_eq!(
        encode(FormulaMode::Classification, &["(A+B)"], &[]).unwrap(),
        "[(A+B)/FT+(A+B)/CP]"
    );
    assert_eq!(
        encode(FormulaMode::Classification, &["(A)+(B)"], &[]).unwrap(),
        "[((A)+(B))/FT+((A)+(B))/CP]"
    );
}

#[test]
fn classification_ignores_counts_and_width_expansion() {
    assert_eq!(
        encode(FormulaMode::Classification, &["Ｇ０６Ｆ"], &["9"]).unwrap(),
        "[G06F/FT+G06F/CP]"
    );
}

// ===== Counts =====
#[test]
fn blank_count_uses_default() {
    assert_eq!(
        literal().encode(FormulaMode::Pair, &["A", "B"], &[""]).unwrap(),
        "A,1N,B/TX"
    );
    assert_eq!(
        literal().encode(FormulaMode::Pair, &["A", "B"], &[]).unwrap(),
        "A,1N,B/TX"
    );
    let config = EncodeConfig {
        default_count: "30".to_string(),
        ..EncodeConfig::literal()
    };
    assert_eq!(
        FormulaEncoder::new(config)
            .encode(FormulaMode::Pair, &["A", "B"], &["  "])
            .unwrap(),
        "A,30N,B/TX"
    );
}

#[test]
fn full_width_count_is_folded() {
    assert_eq!(
        literal().encode(FormulaMode::Pair, &["A", "B"], &["３０"]).unwrap(),
        "A,30N,B/TX"
    );
}

#[test]
fn bad_count_is_rejected() {
    assert_eq!(
        literal().encode(FormulaMode::Pair, &["A", "B"], &["-3"]),
        Err(EncodeError::InvalidCount { value: "-3".into() })
    );
    assert_eq!(
        literal().encode(FormulaMode::Pair, &["A", "B"], &["3N"]),
        Err(EncodeError::InvalidCount { value: "3N".into() })
    );
}

#[test]
fn single_ignores_counts() {
    assert_eq!(
        literal().encode(FormulaMode::Single, &["A"], &["junk"]).unwrap(),
        "A/TX"
    );
}

// ===== Validation =====
#[test]
fn empty_word_is_rejected() {
    assert_eq!(
        encode(FormulaMode::Pair, &["A", "  "], &["3"]),
        Err(EncodeError::EmptyWord { slot: 1 })
    );
    assert_eq!(
        encode(FormulaMode::Single, &["+"], &[]),
        Err(EncodeError::EmptyWord { slot: 0 })
    );
    assert_eq!(
        encode(FormulaMode::Classification, &["\u{3000}"], &[]),
        Err(EncodeError::EmptyWord { slot: 0 })
    );
}

#[test]
fn word_count_must_match_mode() {
    assert_eq!(
        encode(FormulaMode::SerialTriple, &["A", "B"], &["3"]),
        Err(EncodeError::WordCount {
            mode: FormulaMode::SerialTriple,
            expected: 3,
            got: 2
        })
    );
}

#[test]
fn output_separator_is_rejected() {
    assert_eq!(
        encode(FormulaMode::Single, &["A*B"], &[]),
        Err(EncodeError::ForbiddenSeparator { slot: 0 })
    );
    assert_eq!(
        encode(FormulaMode::Pair, &["A", "Ｂ＊"], &["1"]),
        Err(EncodeError::ForbiddenSeparator { slot: 1 })
    );
}

#[test]
fn unbalanced_brackets_are_rejected() {
    assert_eq!(
        encode(FormulaMode::Single, &["A)"], &[]),
        Err(EncodeError::UnbalancedBrackets { slot: 0 })
    );
    assert_eq!(
        encode(FormulaMode::Pair, &["A", "（B"], &["1"]),
        Err(EncodeError::UnbalancedBrackets { slot: 1 })
    );
    assert_eq!(
        encode(FormulaMode::Classification, &["(H01L"], &[]),
        Err(EncodeError::UnbalancedBrackets { slot: 0 })
    );
    assert_eq!(
        encode(FormulaMode::Single, &["(A]"], &[]),
        Err(EncodeError::UnbalancedBrackets { slot: 0 })
    );
}

#[test]
fn parenthesized_word_is_a_fixed_point() {
    let text = encode(FormulaMode::Single, &["(A+B)"], &[]).unwrap();
    assert_eq!(text, "(A+B+Ａ+Ｂ)/TX");
    let formula = decode(&text).unwrap();
    assert_eq!(formula.words, vec!["A+B+Ａ+Ｂ"]);
    assert_eq!(formula.encode_with(&EncodeConfig::default()).unwrap(), text);

    let canonical = EncodeConfig::canonical();
    assert_round_trip(&canonical, FormulaMode::Single, &["((A+B))"], &[]);
    assert_round_trip(&canonical, FormulaMode::Pair, &["(X+Y)+Z", "(日本)"], &["4"]);
    assert_round_trip(
        &EncodeConfig::literal(),
        FormulaMode::ParallelTriple,
        &["(A)+(B)", "C", "(D+E)"],
        &["2"],
    );
}

// ===== Decoding =====
#[test]
fn decode_each_mode() {
    assert_decodes_to("ABC/TX", FormulaMode::Single, &["ABC"], &[]);
    assert_decodes_to("A,30N,B/TX", FormulaMode::Pair, &["A", "B"], &["30"]);
    assert_decodes_to("{A,5N,B,5N,C}/TX", FormulaMode::SerialTriple, &["A", "B", "C"], &["5"]);
    assert_decodes_to("{A,B,C},7N/TX", FormulaMode::CollectionTriple, &["A", "B", "C"], &["7"]);
    assert_decodes_to("[A/TX+B,2N,C/TX]", FormulaMode::ParallelTriple, &["A", "B", "C"], &["2"]);
    assert_decodes_to("[X/FT+X/CP]", FormulaMode::Classification, &["X"], &[]);
}

#[test]
fn decode_strips_word_parentheses() {
    assert_decodes_to(
        "[(A+Ａ)/TX+(B+Ｂ),2N,((C))/TX]",
        FormulaMode::ParallelTriple,
        &["A+Ａ", "B+Ｂ", "C"],
        &["2"],
    );
    assert_decodes_to(
        "[(H01L+G06F)/FT+(H01L+G06F)/CP]",
        FormulaMode::Classification,
        &["H01L+G06F"],
        &[],
    );
}

#[test]
fn decode_suffixes_any_case() {
    assert_decodes_to("a,3n,b/tx", FormulaMode::Pair, &["a", "b"], &["3"]);
    assert_decodes_to("[a/Tx+b,3N,c/tX]", FormulaMode::ParallelTriple, &["a", "b", "c"], &["3"]);
    assert_decodes_to("[X/ft+X/cp]", FormulaMode::Classification, &["X"], &[]);
    assert_decodes_to("{A,B,C},7n", FormulaMode::CollectionTriple, &["A", "B", "C"], &["7"]);
}

#[test]
fn decode_without_tx_suffix() {
    assert_decodes_to("ABC", FormulaMode::Single, &["ABC"], &[]);
    assert_decodes_to(" A , 3N , B ", FormulaMode::Pair, &["A", "B"], &["3"]);
}

#[test]
fn serial_with_two_counts_keeps_the_first() {
    assert_decodes_to("{A,5N,B,9N,C}/TX", FormulaMode::SerialTriple, &["A", "B", "C"], &["5"]);
}

#[test]
fn class_bases_must_agree() {
    // Falls through to the flat shapes, where it is a single bracketed word.
    assert_decodes_to("[X/FT+Y/CP]", FormulaMode::Single, &["[X/FT+Y/CP]"], &[]);
    assert_decodes_to("[/FT+/CP]", FormulaMode::Single, &["[/FT+/CP]"], &[]);
}

#[test]
fn parallel_right_side_needs_a_count() {
    // No valid parallel or class shape: the outer brackets make it one word.
    assert_decodes_to("[A/TX+B,C,D/TX]", FormulaMode::Single, &["[A/TX+B,C,D/TX]"], &[]);
}

#[test]
fn brace_text_without_counts_falls_back_to_single() {
    assert_decodes_to("{A,5N,B,C,D}/TX", FormulaMode::Single, &["{A,5N,B,C,D}"], &[]);
}

#[test]
fn collection_needs_three_non_empty_words() {
    assert_unparseable("{A,B},3N/TX");
    assert_unparseable("{A,,C},3N/TX");
    assert_unparseable("{A,B,C,D},3N/TX");
}

#[test]
fn unparseable_shapes() {
    assert_unparseable("");
    assert_unparseable("/TX");
    assert_unparseable("A,B/TX");
    assert_unparseable("A,3X,B/TX");
    assert_unparseable("A,3N,B,4N/TX");
    assert_unparseable(",3N,B/TX");
}

#[test]
fn unparseable_error_carries_the_text() {
    assert_eq!(
        decode("A,B"),
        Err(DecodeError::Unparseable { text: "A,B".into() })
    );
    assert_eq!(decode("A,B").unwrap_err().to_string(), "unparseable formula: A,B");
}

#[test]
fn stray_closer_is_tolerated_by_decoder() {
    assert_decodes_to("A),3N,B/TX", FormulaMode::Pair, &["A)", "B"], &["3"]);
}

// ===== Modes =====
#[test]
fn mode_names_round_trip() {
    for mode in FormulaMode::ALL {
        assert_eq!(mode.name().parse::<FormulaMode>(), Ok(mode));
    }
    assert_eq!("PAIR".parse::<FormulaMode>(), Ok(FormulaMode::Pair));
    assert!("triple".parse::<FormulaMode>().is_err());
}

#[test]
fn mode_slots() {
    assert_eq!(FormulaMode::Pair.word_slots(), 2);
    assert_eq!(FormulaMode::ParallelTriple.count_slots(), 1);
    assert_eq!(FormulaMode::Classification.count_slots(), 0);
    assert_eq!(FormulaMode::ParallelTriple.default_count(), Some("5"));
    assert_eq!(FormulaMode::Single.default_count(), None);
}

#[test]
fn formula_display() {
    let f = decode("A,30N,B/TX").unwrap();
    assert_eq!(f.to_string(), "pair: A | B ; n = 30");
}

// ===== Round trips =====
#[test]
fn round_trip_scenarios() {
    let lit = EncodeConfig::literal();
    assert_eq!(assert_round_trip(&lit, FormulaMode::Single, &["ABC"], &[]), "ABC/TX");
    assert_eq!(assert_round_trip(&lit, FormulaMode::Pair, &["A", "B"], &["30"]), "A,30N,B/TX");
    assert_eq!(
        assert_round_trip(&lit, FormulaMode::ParallelTriple, &["A", "B", "C"], &["2"]),
        "[A/TX+B,2N,C/TX]"
    );
    let canon = EncodeConfig::canonical();
    assert_round_trip(&canon, FormulaMode::SerialTriple, &["A+B", "日本", "x-1"], &["5"]);
    assert_round_trip(&canon, FormulaMode::Classification, &["H04W12/08+H04W72/12"], &[]);
}

fn mode_and_words() -> impl Strategy<Value = (FormulaMode, Vec<String>)> {
    prop::sample::select(FormulaMode::ALL.to_vec()).prop_flat_map(|mode| {
        let words = if mode == FormulaMode::Classification {
            prop::collection::vec(class_code(), 1).boxed()
        } else {
            prop::collection::vec(mix_word(), mode.word_slots()).boxed()
        };
        (Just(mode), words)
    })
}

proptest! {
    #[test]
    fn decode_inverts_encode(
        (mode, words) in mode_and_words(),
        n in count(),
        width_variants in any::<bool>(),
    ) {
        let config = EncodeConfig { width_variants, ..EncodeConfig::default() };
        let words: Vec<&str> = words.iter().map(String::as_str).collect();
        assert_round_trip(&config, mode, &words, &[n.as_str()]);
    }

    #[test]
    fn decode_never_panics(text in "[A-C,+/TXNFP0-9(){}\\[\\] ]{0,24}") {
        let _ = decode(&text);
    }
}
