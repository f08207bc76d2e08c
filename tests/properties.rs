use std::collections::BTreeSet;

use heterogeneity::Analysis;
use heterogeneity::Histogram;
use heterogeneity::diversity::Diversity;
use heterogeneity::index::CountPolicy;
use heterogeneity::index::Index;
use heterogeneity::record::Record;
use heterogeneity::similarity::Pairs;
use heterogeneity::similarity::jaccard;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Generates a random cohort table with consistent patient counts.
fn random_records(rng: &mut StdRng, n_patients: usize, n_loci: usize) -> Vec<Record> {
    (0..n_loci)
        .map(|locus| {
            let patients = (0..n_patients)
                .filter(|_| rng.gen_bool(0.3))
                .map(|patient| format!("P{patient}"))
                .collect::<Vec<_>>();

            Record::new(format!("L{locus}"), patients.len(), patients)
        })
        .collect()
}

#[test]
fn test_jaccard_is_symmetric_and_bounded() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let records = random_records(&mut rng, 8, 30);
        let index = Index::try_from_records(records, CountPolicy::Validate).unwrap();
        let patient_loci = index.patient_loci();

        for pair in Pairs::new(patient_loci) {
            assert_ne!(pair.a(), pair.b());
            assert!((0.0..=1.0).contains(&pair.score()));

            let a = &patient_loci[pair.a()];
            let b = &patient_loci[pair.b()];
            assert_eq!(jaccard(a, b), jaccard(b, a));
            assert_eq!(jaccard(a, b), pair.score());
        }

        let n = index.num_patients();
        assert_eq!(Pairs::new(patient_loci).count(), n * n.saturating_sub(1) / 2);
    }
}

#[test]
fn test_pairs_are_enumerated_once() {
    let mut rng = StdRng::seed_from_u64(11);
    let records = random_records(&mut rng, 12, 40);
    let index = Index::try_from_records(records, CountPolicy::Trust).unwrap();

    let mut seen = BTreeSet::new();
    for pair in Pairs::new(index.patient_loci()) {
        let key = if pair.a() < pair.b() {
            (pair.a(), pair.b())
        } else {
            (pair.b(), pair.a())
        };
        assert!(seen.insert(key), "pair {key:?} enumerated twice");
    }
}

#[test]
fn test_entropy_is_non_negative() {
    let mut rng = StdRng::seed_from_u64(13);

    for _ in 0..200 {
        let n = rng.gen_range(0..50);
        let histogram = (0..n)
            .map(|_| rng.gen_range(0..6))
            .collect::<Histogram>();

        let diversity = Diversity::shannon(&histogram);
        assert!(diversity.value() >= 0.0);

        match histogram.len() {
            0 => assert!(diversity.is_trivial()),
            1 => assert_eq!(diversity.value(), 0.0),
            _ => assert!(diversity.value() > 0.0),
        }
    }
}

#[test]
fn test_reanalysis_is_identical() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(17);
    let records = random_records(&mut rng, 10, 60);

    let mut data = String::from("locus,n_patients,patients\n");
    for record in &records {
        data.push_str(&format!(
            "{},{},\"{}\"\n",
            record.locus(),
            record.n_patients(),
            record.patients().join(", ")
        ));
    }

    let first = Analysis::try_from_reader(data.as_bytes(), CountPolicy::Trust)?;
    let second = Analysis::try_from_reader(data.as_bytes(), CountPolicy::Trust)?;

    assert_eq!(first, second);

    let (a, b) = (
        first.similarity().summary().unwrap(),
        second.similarity().summary().unwrap(),
    );
    assert_eq!(a.mean().to_bits(), b.mean().to_bits());
    assert_eq!(
        first.diversity().value().to_bits(),
        second.diversity().value().to_bits()
    );

    Ok(())
}
