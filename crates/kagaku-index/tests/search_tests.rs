use kagaku_core::dataset::Dataset;
use kagaku_core::types::Problem;
use kagaku_index::{Filters, SearchIndex, SparseVector, MAX_RESULTS};

fn problem(id: &str, title: &str, statement: &str, tags: &[&str], source: &str) -> Problem {
    Problem {
        id: id.to_string(),
        title: title.to_string(),
        statement: statement.to_string(),
        choices: vec![],
        answer: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        concepts: vec![],
        source: source.to_string(),
    }
}

/// Two problems mirroring the corpus: q1 is about the ideal gas law,
/// q2 about chemical equilibrium.
fn gas_and_equilibrium() -> Dataset {
    let q1 = Problem {
        concepts: vec!["状態方程式".to_string()],
        ..problem(
            "q1",
            "気体の状態方程式",
            "理想気体の体積を求めよ",
            &["気体", "計算"],
            "dummy",
        )
    };
    let q2 = Problem {
        concepts: vec!["ルシャトリエの原理".to_string()],
        ..problem(
            "q2",
            "化学平衡の移動",
            "平衡定数を使って濃度を求めよ",
            &["平衡"],
            "dummy",
        )
    };
    Dataset::new(vec![q1, q2]).expect("unique ids")
}

#[test]
fn self_similarity_is_one() {
    for text in ["気体の状態方程式", "ab", "neutralization titration"] {
        let v = SparseVector::from_text(text);
        assert!(!v.is_zero());
        assert!(
            (v.dot(&v) - 1.0).abs() < 1e-5,
            "self-similarity of {:?} was {}",
            text,
            v.dot(&v)
        );
    }
}

#[test]
fn disjoint_bigram_texts_score_zero() {
    assert_eq!(SparseVector::from_text("ab").dot(&SparseVector::from_text("cd")), 0.0);
    assert_eq!(SparseVector::from_text("気体").dot(&SparseVector::from_text("平衡")), 0.0);
}

#[test]
fn sub_bigram_texts_vectorize_to_zero() {
    assert!(SparseVector::from_text("").is_zero());
    assert!(SparseVector::from_text("a").is_zero());
    assert!(SparseVector::from_text("気").is_zero());
    // whitespace is stripped before bigram extraction
    assert!(SparseVector::from_text("  a  ").is_zero());
    assert_eq!(
        SparseVector::from_text("a").dot(&SparseVector::from_text("気体の状態方程式")),
        0.0
    );
}

#[test]
fn vectorization_is_deterministic() {
    let a = SparseVector::from_text("気体の状態方程式が必要になる問題");
    let b = SparseVector::from_text("気体の状態方程式が必要になる問題");
    assert_eq!(a, b);

    let dataset = gas_and_equilibrium();
    let first = SearchIndex::build(&dataset);
    let second = SearchIndex::build(&dataset);
    let query = SparseVector::from_text("気体");
    assert_eq!(first.score_all(&query), second.score_all(&query));
}

#[test]
fn query_ranks_problem_sharing_more_bigrams_first() {
    let dataset = gas_and_equilibrium();
    let index = SearchIndex::build(&dataset);

    let hits = index.search(&dataset, "気体の状態方程式", &Filters::default());
    assert_eq!(hits[0].id, "q1");
    assert!(hits[0].score > 0.0);
    if let Some(second) = hits.get(1) {
        assert!(hits[0].score > second.score);
    }
}

#[test]
fn exact_text_query_scores_one() {
    let dataset = gas_and_equilibrium();
    let index = SearchIndex::build(&dataset);

    // querying with q1's full searchable text reproduces its vector
    let q1 = dataset.get("q1").expect("q1 exists");
    let query = kagaku_index::index::searchable_text(q1);
    let hits = index.search(&dataset, &query, &Filters::default());
    assert_eq!(hits[0].id, "q1");
    assert!((hits[0].score - 1.0).abs() < 1e-5);
}

#[test]
fn empty_query_with_tag_filter_returns_only_matching_problem() {
    let dataset = gas_and_equilibrium();
    let index = SearchIndex::build(&dataset);

    let filters = Filters::parse(None, Some("気体,計算"), None);
    let hits = index.search(&dataset, "", &filters);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "q1");
    assert_eq!(hits[0].score, 0.0);
}

#[test]
fn empty_query_with_unmatched_source_filter_returns_nothing() {
    let dataset = gas_and_equilibrium();
    let index = SearchIndex::build(&dataset);

    let filters = Filters::parse(Some("other"), None, None);
    let hits = index.search(&dataset, "", &filters);
    assert!(hits.is_empty());
}

#[test]
fn empty_query_without_filters_returns_everything_in_id_order() {
    let dataset = gas_and_equilibrium();
    let index = SearchIndex::build(&dataset);

    let hits = index.search(&dataset, "", &Filters::default());
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, "q1");
    assert_eq!(hits[1].id, "q2");
    assert!(hits.iter().all(|h| h.score == 0.0));
}

#[test]
fn results_never_exceed_max_and_ties_break_by_id() {
    let problems: Vec<Problem> = (1..=12)
        .map(|i| {
            problem(
                &format!("q{:02}", i),
                "同じ題名",
                "同じ問題文",
                &["計算"],
                "dummy",
            )
        })
        .collect();
    let dataset = Dataset::new(problems).expect("unique ids");
    let index = SearchIndex::build(&dataset);

    // identical texts, so every score ties; id decides the order
    let hits = index.search(&dataset, "同じ題名", &Filters::default());
    assert_eq!(hits.len(), MAX_RESULTS);
    for (i, hit) in hits.iter().enumerate() {
        assert_eq!(hit.id, format!("q{:02}", i + 1));
    }
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn adding_filters_never_grows_the_result_set() {
    let dataset = gas_and_equilibrium();
    let index = SearchIndex::build(&dataset);

    let unfiltered = index.search(&dataset, "求めよ", &Filters::default());
    let filtered = index.search(&dataset, "求めよ", &Filters::parse(None, Some("平衡"), None));
    assert!(filtered.len() <= unfiltered.len());
    for hit in &filtered {
        assert!(unfiltered.iter().any(|u| u.id == hit.id));
    }
}

#[test]
fn filters_are_conjunctive_across_fields() {
    let dataset = gas_and_equilibrium();
    let index = SearchIndex::build(&dataset);

    // right tag, wrong source: no match
    let filters = Filters::parse(Some("other"), Some("気体"), None);
    assert!(index.search(&dataset, "", &filters).is_empty());

    // both tags must be present
    let filters = Filters::parse(None, Some("気体,平衡"), None);
    assert!(index.search(&dataset, "", &filters).is_empty());

    // concept filter works like the tag filter
    let filters = Filters::parse(None, None, Some("状態方程式"));
    let hits = index.search(&dataset, "", &filters);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "q1");
}

#[test]
fn filter_parsing_is_permissive() {
    let filters = Filters::parse(Some("  "), Some(" 気体 , , 計算 ,"), None);
    assert!(filters.source.is_none());
    assert_eq!(filters.tags, vec!["気体", "計算"]);
    assert!(filters.concepts.is_empty());
    assert!(!filters.is_empty());
    assert!(Filters::parse(None, Some(",,,"), None).is_empty());
}
