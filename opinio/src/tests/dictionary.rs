use std::fs::File;
use std::io::Write;

use tempfile::tempdir;

use crate::dictionary::{Dictionary, DictionaryBuilder, DictionaryInner};
use crate::tag::Polarity;
use crate::tagger::{AspectResolver, PolarityLookup};
use crate::tokenizer::Analyzer;

const LIWC_DIC: &str = include_str!("./resources/liwc_sample.dic");
const ASPECTS_CSV: &str = include_str!("./resources/aspects.csv");

fn build_inner() -> DictionaryInner {
    DictionaryBuilder::from_readers(
        LIWC_DIC.as_bytes(),
        ASPECTS_CSV.as_bytes(),
        None::<&[u8]>,
    )
    .unwrap()
}

fn check_loaded(dict: &Dictionary) {
    assert_eq!(dict.lexicon().polarity("péssima"), Some(Polarity::Negative));
    assert_eq!(dict.lexicon().polarity("mesa"), None);
    assert_eq!(dict.aspects().resolve("celular"), Some("aparelho"));
    assert_eq!(dict.aspects().resolve("duração"), Some("bateria"));
    assert_eq!(dict.modifiers().len(), 22);
}

#[test]
fn test_load_plain_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("system.dic");
    let inner = build_inner();
    inner.write(File::create(&path).unwrap()).unwrap();

    let dict = Dictionary::from_path(&path).unwrap();
    check_loaded(&dict);
    assert_eq!(dict.to_inner(), inner);
}

#[test]
fn test_load_zstd_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("system.dic.zst");
    let inner = build_inner();
    {
        let mut encoder = zstd::Encoder::new(File::create(&path).unwrap(), 19).unwrap();
        inner.write(&mut encoder).unwrap();
        encoder.finish().unwrap().flush().unwrap();
    }

    let dict = Dictionary::from_path(&path).unwrap();
    check_loaded(&dict);
    let dict = Dictionary::from_zstd(&path).unwrap();
    check_loaded(&dict);

    let mut worker = Analyzer::new(dict).new_worker();
    worker.reset_document("Duração da bateria péssima.");
    worker.analyze();
    assert_eq!(worker.aspect_polarities().get("bateria"), Some(-2.0));
}

#[test]
fn test_load_errors() {
    let dir = tempdir().unwrap();
    assert!(Dictionary::from_path(dir.path()).is_err());
    assert!(Dictionary::from_path(dir.path().join("missing.dic")).is_err());

    let path = dir.path().join("broken.dic");
    File::create(&path)
        .unwrap()
        .write_all(b"not a dictionary")
        .unwrap();
    assert!(Dictionary::from_path(&path).is_err());

    let path = dir.path().join("empty.dic");
    File::create(&path).unwrap();
    assert!(Dictionary::from_path(&path).is_err());
}
