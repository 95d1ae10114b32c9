use predicate_tree::{ClassifierConfig, DecisionTreeClassifier, LeafReason, LeafResolution, Predicate, Row};
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Symptom {
    Symptom1,
    Symptom2,
    Symptom3,
    Symptom4,
    Symptom5,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Diagnosis {
    DiagnosisA,
    DiagnosisB,
    DiagnosisC,
    DiagnosisD,
    DiagnosisE,
}

use Diagnosis::*;
use Symptom::*;

#[derive(Clone, Debug)]
struct Patient {
    first: Symptom,
    second: Symptom,
    diagnosis: Option<Diagnosis>,
}

impl Patient {
    fn new(first: Symptom, second: Symptom, diagnosis: Diagnosis) -> Self {
        Patient {
            first,
            second,
            diagnosis: Some(diagnosis),
        }
    }

    fn query(first: Symptom, second: Symptom) -> Self {
        Patient {
            first,
            second,
            diagnosis: None,
        }
    }

    fn has(&self, symptom: Symptom) -> bool {
        self.first == symptom || self.second == symptom
    }
}

impl Row for Patient {
    type Class = Diagnosis;
    fn classification(&self) -> Option<Diagnosis> {
        self.diagnosis
    }
}

fn five_patients() -> Vec<Patient> {
    vec![
        Patient::new(Symptom1, Symptom2, DiagnosisA),
        Patient::new(Symptom1, Symptom3, DiagnosisB),
        Patient::new(Symptom4, Symptom5, DiagnosisC),
        Patient::new(Symptom1, Symptom3, DiagnosisD),
        Patient::new(Symptom2, Symptom3, DiagnosisE),
    ]
}

fn has_symptom_predicates() -> Vec<Predicate<Patient>> {
    [Symptom1, Symptom2, Symptom3, Symptom4, Symptom5]
        .into_iter()
        .enumerate()
        .map(|(i, s)| Predicate::new(format!("Q{}", i + 1), move |p: &Patient| p.has(s)))
        .collect()
}

fn eight_patients() -> Vec<Patient> {
    vec![
        Patient::new(Symptom1, Symptom2, DiagnosisA),
        Patient::new(Symptom1, Symptom1, DiagnosisB),
        Patient::new(Symptom1, Symptom5, DiagnosisC),
        Patient::new(Symptom1, Symptom3, DiagnosisD),
        Patient::new(Symptom5, Symptom3, DiagnosisE),
        Patient::new(Symptom1, Symptom4, DiagnosisB),
        Patient::new(Symptom1, Symptom1, DiagnosisC),
        Patient::new(Symptom2, Symptom3, DiagnosisC),
    ]
}

fn question_predicates() -> Vec<Predicate<Patient>> {
    vec![
        Predicate::new("Question 1", |p: &Patient| p.first == Symptom1 || p.second == Symptom5),
        Predicate::new("Question 2", |p: &Patient| p.first == Symptom1 || p.second == Symptom3),
        Predicate::new("Question 3", |p: &Patient| p.has(Symptom3)),
        Predicate::new("Question 4", |p: &Patient| p.has(Symptom4)),
        Predicate::new("Question 5", |p: &Patient| p.has(Symptom5)),
    ]
}

#[test]
fn test_five_patients_root_impurity() {
    let classifier = DecisionTreeClassifier::new(&five_patients(), has_symptom_predicates()).unwrap();
    let expected = 1.0 - 5.0 * (1.0_f64 / 5.0).powi(2);
    assert!((classifier.root_gini_impurity() - expected).abs() < 1e-12);
    assert!((classifier.root_gini_impurity() - 0.8).abs() < 1e-12);
}

#[test]
fn test_five_patients_classification() {
    let patients = five_patients();
    let classifier = DecisionTreeClassifier::new(&patients, has_symptom_predicates()).unwrap();
    println!("{}", classifier);

    let duplicates = HashSet::from([DiagnosisB, DiagnosisD]);
    for _ in 0..100 {
        assert_eq!(classifier.classify(&patients[0]), DiagnosisA);
        assert_eq!(classifier.classify(&patients[2]), DiagnosisC);
        assert_eq!(classifier.classify(&patients[4]), DiagnosisE);
        assert!(duplicates.contains(&classifier.classify(&patients[1])));
        assert!(duplicates.contains(&classifier.classify(&patients[3])));
        assert!(duplicates.contains(&classifier.classify(&Patient::query(Symptom1, Symptom3))));
        assert!(duplicates.contains(&classifier.classify(&Patient::query(Symptom3, Symptom1))));
    }

    // Every non-trivial root split scores the same, the first predicate wins.
    let (label, _, _) = classifier.split_summary(classifier.root()).unwrap();
    assert_eq!(label, "Q1");

    // The only Symptom4 / Symptom5 row ends alone in its leaf.
    assert_eq!(patients.iter().filter(|p| p.has(Symptom4) || p.has(Symptom5)).count(), 1);
    let leaf = classifier.leaf_for(&patients[2]);
    assert_eq!(leaf.partition, vec![2]);
    assert_eq!(leaf.leaf_reason, Some(LeafReason::Singleton));

    let ambiguous = classifier.leaf_for(&patients[1]);
    assert_eq!(ambiguous.partition, vec![1, 3]);
    assert_eq!(ambiguous.leaf_reason, Some(LeafReason::ZeroGain));
}

#[test]
fn test_five_patients_ambiguous_leaf_samples_both() {
    let patients = five_patients();
    let classifier = DecisionTreeClassifier::with_config(
        &patients,
        has_symptom_predicates(),
        ClassifierConfig::default().set_seed(Some(17)),
    )
    .unwrap();
    let batch: Vec<Patient> = (0..200).map(|_| patients[1].clone()).collect();
    let seen: HashSet<Diagnosis> = classifier.classify_all(&batch).into_iter().collect();
    assert_eq!(seen, HashSet::from([DiagnosisB, DiagnosisD]));
}

#[test]
fn test_eight_patients_tree_structure() {
    let classifier = DecisionTreeClassifier::new(&eight_patients(), question_predicates()).unwrap();
    println!("{}", classifier);
    let label = |n: &predicate_tree::Node| classifier.split_summary(n).map(|(l, _, _)| l.to_string());
    let child = |n: &predicate_tree::Node, outcome: bool| classifier.node(n.get_child_idx(outcome).unwrap()).unwrap();

    let root = classifier.root();
    assert_eq!(label(root).as_deref(), Some("Question 4"));
    assert!((root.impurity - 0.75).abs() < 1e-12);
    assert_eq!(child(root, true).partition, vec![5]);
    assert_eq!(child(root, false).partition.len(), 7);

    let q3 = child(root, false);
    assert_eq!(label(q3).as_deref(), Some("Question 3"));
    assert_eq!(child(q3, false).partition, vec![0, 1, 2, 6]);
    assert_eq!(child(q3, true).partition, vec![3, 4, 7]);

    let q5 = child(q3, false);
    assert_eq!(label(q5).as_deref(), Some("Question 5"));
    assert_eq!(child(q5, true).partition, vec![2]);
    let mixed = child(q5, false);
    assert_eq!(mixed.partition, vec![0, 1, 6]);
    assert_eq!(mixed.leaf_reason, Some(LeafReason::ZeroGain));
    assert_eq!(classifier.node_classes(mixed), vec![DiagnosisA, DiagnosisB, DiagnosisC]);

    let q1 = child(q3, true);
    assert_eq!(label(q1).as_deref(), Some("Question 1"));
    assert_eq!(child(q1, true).partition, vec![3]);
    let last = child(q1, false);
    assert_eq!(label(last).as_deref(), Some("Question 5"));
    assert_eq!(child(last, false).partition, vec![7]);
    assert_eq!(child(last, true).partition, vec![4]);

    assert_eq!(classifier.n_nodes(), 11);
    assert_eq!(classifier.n_leaves(), 6);
    assert_eq!(classifier.depth(), 4);
}

#[test]
fn test_eight_patients_classification() {
    let classifier = DecisionTreeClassifier::new(&eight_patients(), question_predicates()).unwrap();
    let queries = vec![
        Patient::query(Symptom1, Symptom2),
        Patient::query(Symptom1, Symptom3),
        Patient::query(Symptom2, Symptom5),
        Patient::query(Symptom3, Symptom1),
        Patient::query(Symptom2, Symptom4),
        Patient::query(Symptom5, Symptom3),
    ];
    let mixed = HashSet::from([DiagnosisA, DiagnosisB, DiagnosisC]);
    for _ in 0..100 {
        let results = classifier.classify_all(&queries);
        assert!(mixed.contains(&results[0]));
        assert_eq!(results[1], DiagnosisD);
        assert_eq!(results[2], DiagnosisC);
        assert_eq!(results[3], DiagnosisC);
        assert_eq!(results[4], DiagnosisB);
        assert_eq!(results[5], DiagnosisE);
    }
}

#[test]
fn test_leaves_terminate_for_a_reason() {
    let patients = eight_patients();
    let classifier = DecisionTreeClassifier::new(&patients, question_predicates()).unwrap();
    for leaf in classifier.tree().leaves() {
        let classes = classifier.node_classes(leaf);
        match leaf.leaf_reason {
            Some(LeafReason::Singleton) => assert!(leaf.partition.len() <= 1),
            Some(LeafReason::Homogeneous) => assert_eq!(classes.len(), 1),
            Some(LeafReason::ZeroGain) | Some(LeafReason::EmptySide) => assert!(classes.len() > 1),
            other => panic!("unexpected leaf reason {:?}", other),
        }
    }
    let covered: usize = classifier.tree().leaves().map(|l| l.partition.len()).sum();
    assert_eq!(covered, patients.len());
}

#[test]
fn test_majority_resolution_is_deterministic() {
    let classifier = DecisionTreeClassifier::with_config(
        &eight_patients(),
        question_predicates(),
        ClassifierConfig::default().set_leaf_resolution(LeafResolution::Majority),
    )
    .unwrap();
    // Diagnoses A, B and C tie in the mixed leaf, A is seen first.
    for _ in 0..20 {
        assert_eq!(classifier.classify(&Patient::query(Symptom1, Symptom2)), DiagnosisA);
    }
}

#[test]
fn test_ranked_predicates() {
    let classifier = DecisionTreeClassifier::new(&eight_patients(), question_predicates()).unwrap();
    let ranked = classifier.ranked_predicates();
    assert_eq!(classifier.predicate_label(ranked[0].predicate), Some("Question 4"));
    assert_eq!(classifier.predicate_label(ranked[1].predicate), Some("Question 3"));
    assert!(ranked.windows(2).all(|w| w[0].information_gain >= w[1].information_gain));
    // Question 2 is true for every row.
    let last = ranked.last().unwrap();
    assert_eq!(classifier.predicate_label(last.predicate), Some("Question 2"));
    assert_eq!(last.information_gain, 0.0);
}
