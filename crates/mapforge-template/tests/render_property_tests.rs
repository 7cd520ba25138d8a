use mapforge_template::{FieldValues, Template, TemplateSchema, PLACEHOLDER_MARKER};
use proptest::prelude::*;

const REQUIRED: [&str; 3] = ["PH_TAG", "PH_COUNTRY_TAG", "PH_COLOR"];
const OPTIONAL: [&str; 2] = ["PH_NICKNAME", "PH_DEATH_DATE"];

fn schema() -> TemplateSchema {
    let mut schema = TemplateSchema::new();
    for name in REQUIRED {
        schema = schema.required(name);
    }
    for name in OPTIONAL {
        schema = schema.optional_line(name);
    }
    schema
}

#[derive(Debug, Clone)]
enum Piece {
    Text(String),
    Required(usize),
    Optional(usize),
}

fn piece() -> impl Strategy<Value = Piece> {
    prop_oneof![
        "[a-z =\\{\\}\t\n]{0,12}".prop_map(Piece::Text),
        (0..REQUIRED.len()).prop_map(Piece::Required),
        (0..OPTIONAL.len()).prop_map(Piece::Optional),
    ]
}

fn template_text(pieces: &[Piece]) -> String {
    let mut out = String::new();
    for p in pieces {
        match p {
            Piece::Text(t) => out.push_str(t),
            Piece::Required(i) => out.push_str(REQUIRED[*i]),
            Piece::Optional(i) => {
                out.push_str(OPTIONAL[*i]);
                out.push('\n');
            }
        }
    }
    out
}

proptest! {
    #[test]
    fn rendered_output_has_no_placeholder_tokens(
        pieces in prop::collection::vec(piece(), 0..24),
        required_values in prop::collection::vec("[a-z0-9_ ]{0,8}", REQUIRED.len()),
        optional_values in prop::collection::vec(prop::option::of("[a-z0-9_=\\{\\} \t]{0,10}"), OPTIONAL.len()),
    ) {
        let template = Template::parse(&template_text(&pieces), &schema()).expect("parse");
        let mut values = FieldValues::new();
        for (name, value) in REQUIRED.iter().zip(&required_values) {
            values.set(name, value.clone());
        }
        for (name, value) in OPTIONAL.iter().zip(&optional_values) {
            values.set_optional(name, value.clone());
        }

        let out = template.render(&values).expect("render");
        prop_assert!(!out.contains(PLACEHOLDER_MARKER), "out={out:?}");
    }

    #[test]
    fn absent_optional_lines_disappear_entirely(
        lines in prop::collection::vec(prop::option::of(0..OPTIONAL.len()), 0..16),
        present in prop::collection::vec(any::<bool>(), OPTIONAL.len()),
    ) {
        let mut text = String::new();
        let mut expected_lines = 0usize;
        for line in &lines {
            match line {
                Some(i) => {
                    text.push_str(OPTIONAL[*i]);
                    if present[*i] {
                        expected_lines += 1;
                    }
                }
                None => {
                    text.push_str("\tkey = value");
                    expected_lines += 1;
                }
            }
            text.push('\n');
        }

        let mut values = FieldValues::new();
        for (i, name) in OPTIONAL.iter().enumerate() {
            if present[i] {
                values.set(name, format!("\t{}", name.to_lowercase()));
            }
        }

        let template = Template::parse(&text, &schema()).expect("parse");
        let out = template.render(&values).expect("render");
        prop_assert_eq!(out.matches('\n').count(), expected_lines);
        prop_assert!(!out.contains("\n\n"));
    }
}
