// Fixture PDFs built with lopdf at test time
#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::fs;
use std::path::{Path, PathBuf};

/// One element of a `TJ` array.
pub enum Run<'a> {
    Text(&'a str),
    Kern(i64),
}

fn text_object(i: usize, shown: Operation) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 11.into()]),
        Operation::new("Td", vec![50.into(), (740 - 16 * i as i64).into()]),
        shown,
        Operation::new("ET", vec![]),
    ]
}

/// Write a PDF whose pages hold the given lines, one `Tj` text object per line.
pub fn write_pdf(path: &Path, pages: &[&[&str]]) {
    let pages: Vec<Vec<Operation>> = pages
        .iter()
        .map(|lines| {
            lines
                .iter()
                .enumerate()
                .flat_map(|(i, line)| text_object(i, Operation::new("Tj", vec![Object::string_literal(*line)])))
                .collect::<Vec<_>>()
        })
        .collect();
    write_pages(path, pages);
}

/// Like [`write_pdf`], but every line is one `TJ` array of runs and kerning offsets.
pub fn write_tj_pdf(path: &Path, pages: &[&[&[Run]]]) {
    let pages: Vec<Vec<Operation>> = pages
        .iter()
        .map(|lines| {
            lines
                .iter()
                .enumerate()
                .flat_map(|(i, runs)| {
                    let items: Vec<Object> = runs
                        .iter()
                        .map(|run| match run {
                            Run::Text(s) => Object::string_literal(*s),
                            Run::Kern(k) => Object::Integer(*k),
                        })
                        .collect();
                    text_object(i, Operation::new("TJ", vec![Object::Array(items)]))
                })
                .collect::<Vec<_>>()
        })
        .collect();
    write_pages(path, pages);
}

fn write_pages(path: &Path, pages: Vec<Vec<Operation>>) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

pub fn write_garbage(path: &Path) {
    fs::write(path, b"%PDF-1.4\nthis is not really a pdf\n").unwrap();
}

/// Source dir with `a.pdf` (two pages) and `b.pdf` (one page).
pub fn sample_source(root: &Path) -> PathBuf {
    let src = root.join("pdf");
    fs::create_dir(&src).unwrap();
    write_pdf(&src.join("a.pdf"), &[&["Hello", "World"], &["Foo", "Bar"]]);
    write_pdf(&src.join("b.pdf"), &[&["Single page"]]);
    src
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}
