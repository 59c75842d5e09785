use std::sync::Arc;

use crate::dictionary::{Dictionary, DictionaryBuilder, ModifierSets};
use crate::scorer;
use crate::tag::{Modifier, Polarity, Tag};
use crate::tagger;
use crate::tokenizer::Analyzer;
use crate::utils::hashmap;

const LIWC_DIC: &str = include_str!("./resources/liwc_sample.dic");
const ASPECTS_CSV: &str = include_str!("./resources/aspects.csv");

fn build_dictionary() -> Dictionary {
    let inner = DictionaryBuilder::from_readers(
        LIWC_DIC.as_bytes(),
        ASPECTS_CSV.as_bytes(),
        None::<&[u8]>,
    )
    .unwrap();
    Dictionary::from_inner(inner).unwrap()
}

fn polarities(analyzer: &Analyzer, text: &str) -> Vec<(String, f64)> {
    let mut worker = analyzer.new_worker();
    worker.reset_document(text);
    worker.analyze();
    worker
        .aspect_polarities()
        .iter()
        .map(|(aspect, v)| (aspect.to_string(), v))
        .collect()
}

#[test]
fn test_amplified_sentiment() {
    let analyzer = Analyzer::new(build_dictionary());
    assert_eq!(
        polarities(&analyzer, "Adorei o celular, design muito bonito."),
        vec![("aparelho".to_string(), 1.0), ("design".to_string(), 3.0)]
    );
}

#[test]
fn test_tag_and_score_tokens() {
    let tokens = ["adorei", "o", "celular", ",", "design", "muito", "bonito", "."];
    let lexicon = hashmap![
        "adorei".to_string() => Polarity::Positive,
        "bonito".to_string() => Polarity::Positive,
    ];
    let aspects = hashmap![
        "celular".to_string() => "celular".to_string(),
        "design".to_string() => "design".to_string(),
    ];
    let modifiers = ModifierSets::portuguese();

    let doc = tagger::tag(&tokens, &modifiers, &lexicon, &aspects);
    let first = scorer::score(&tokens, &doc.tags, &doc.aspects);
    assert_eq!(first.get("celular"), Some(1.0));
    assert_eq!(first.get("design"), Some(3.0));

    let again = tagger::tag(&tokens, &modifiers, &lexicon, &aspects);
    assert_eq!(again, doc);
    assert_eq!(scorer::score(&tokens, &again.tags, &again.aspects), first);
}

#[test]
fn test_aspect_without_sentiment() {
    let analyzer = Analyzer::new(build_dictionary());
    let text = "Adorei o celular, design muito bonito e moderno. \
                Apesar disso, a bateria não dura muito.";
    assert_eq!(
        polarities(&analyzer, text),
        vec![
            ("aparelho".to_string(), 1.0),
            ("design".to_string(), 3.0),
            ("bateria".to_string(), 0.0),
        ]
    );
}

#[test]
fn test_negation() {
    let analyzer = Analyzer::new(build_dictionary());
    assert_eq!(
        polarities(&analyzer, "A tela não é ruim, mas a câmera é péssima."),
        vec![("tela".to_string(), 1.0), ("câmera".to_string(), -1.0)]
    );
}

#[test]
fn test_downtoner() {
    let analyzer = Analyzer::new(build_dictionary());
    assert_eq!(
        polarities(&analyzer, "A bateria é pouco lenta."),
        vec![("bateria".to_string(), -1.0 / 3.0)]
    );
    assert_eq!(
        polarities(&analyzer, "A bateria não é pouco rápida."),
        vec![("bateria".to_string(), 3.0)]
    );
}

#[test]
fn test_multiword_aspects() {
    let analyzer = Analyzer::new(build_dictionary());
    assert_eq!(
        polarities(&analyzer, "O tempo de resposta é excelente."),
        vec![("desempenho".to_string(), 1.0)]
    );
    assert_eq!(
        polarities(&analyzer, "Ótimo custo-benefício!"),
        vec![("preço".to_string(), 1.0)]
    );

    let analyzer = analyzer.merge_multiword(false);
    let mut worker = analyzer.new_worker();
    worker.reset_document("O tempo de resposta é excelente.");
    worker.analyze();
    assert_eq!(worker.num_tokens(), 7);
    assert_eq!(worker.token(1).tag(), &Tag::Aspect("desempenho".to_string()));
    assert_eq!(worker.token(3).tag(), &Tag::Aspect("desempenho".to_string()));
    assert_eq!(worker.aspect_polarities().get("desempenho"), Some(2.0));
}

#[test]
fn test_hyphenated_word_inside_span() {
    let analyzer = Analyzer::new(build_dictionary());
    assert_eq!(
        polarities(&analyzer, "Tela anti-reflexo excelente."),
        vec![("tela".to_string(), 1.0)]
    );
    assert_eq!(
        polarities(&analyzer, "Tela anti-reflexo muito bonita."),
        vec![("tela".to_string(), 3.0)]
    );
}

#[test]
fn test_ellipsis_is_not_a_boundary() {
    let analyzer = Analyzer::new(build_dictionary());
    assert_eq!(
        polarities(&analyzer, "A bateria... excelente!"),
        vec![("bateria".to_string(), 1.0)]
    );
}

#[test]
fn test_narrow_radius() {
    let analyzer = Analyzer::new(build_dictionary()).context_radius(1).unwrap();
    // "não" is two tokens away from "ruim" and falls outside the radius.
    assert_eq!(
        polarities(&analyzer, "A tela não é ruim."),
        vec![("tela".to_string(), -1.0)]
    );
}

#[test]
fn test_contexts() {
    let analyzer = Analyzer::new(build_dictionary());
    let mut worker = analyzer.new_worker();
    worker.reset_document("Bateria excelente, mas tela muito ruim e decepciona.");
    worker.analyze();
    assert_eq!(worker.token(5).tag(), &Tag::Modifier(Modifier::Amplifier));

    let contexts = worker.aspect_contexts();
    assert_eq!(contexts.len(), 2);
    assert_eq!(contexts[0].aspect, "bateria");
    assert_eq!(contexts[0].sentiments, vec![1]);
    assert_eq!(contexts[1].aspect, "tela");
    assert_eq!((contexts[1].span.start, contexts[1].span.end), (3, 8));
    assert_eq!(contexts[1].sentiments, vec![6, 8]);
    assert_eq!(contexts[1].polarity, -6.0);
}

#[test]
fn test_shared_dictionary() {
    let dict = Arc::new(build_dictionary());
    let texts = [
        "Adorei o celular.",
        "A câmera é péssima.",
        "A tela não é ruim.",
        "Design muito bonito.",
    ];
    let expected: Vec<_> = texts
        .iter()
        .map(|text| polarities(&Analyzer::from_shared_dictionary(dict.clone()), text))
        .collect();

    let results: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = texts
            .iter()
            .map(|text| {
                let analyzer = Analyzer::from_shared_dictionary(dict.clone());
                s.spawn(move || polarities(&analyzer, text))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(results, expected);
}
