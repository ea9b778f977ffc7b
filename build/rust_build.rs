/**
 * Generates rust types for the numbering plan metadata and checks that the
 * embedded metadata is present before the crate is compiled.
 */

use std::{fs::File, io::{BufRead, BufReader}, path::Path};

use thiserror::Error;

const PROTO_FILES: [&str; 2] = [
    "resources/phonemetadata.proto",
    "resources/phonenumber.proto",
];

const METADATA_FILE: &str = "resources/PhoneNumberMetadata.textproto";

#[derive(Debug, Error)]
enum BuildError {
    #[error("IO error occurred: {0}")]
    IO(#[from] std::io::Error),

    #[error("Line {line_num} is too long (max is {max_len} bytes)")]
    LineTooLong { line_num: usize, max_len: usize },

    #[error("Metadata file '{path}' has no `metadata` entries")]
    EmptyMetadata { path: String },
}

/// Makes sure the text format metadata exists, has sane line lengths and
/// declares at least one numbering plan. The contents are parsed properly at
/// runtime.
fn check_metadata(path: &str) -> Result<(), BuildError> {
    let input = File::open(Path::new(path))?;
    const MAX_LINE_LENGTH: usize = 2 * 1024;

    let mut reader = BufReader::new(input);
    let mut line_buffer = String::with_capacity(MAX_LINE_LENGTH);
    let mut line_number = 0;
    let mut entries = 0;

    loop {
        line_number += 1;
        line_buffer.clear();

        let bytes_read = reader.read_line(&mut line_buffer)?;
        if bytes_read == 0 {
            break;
        }
        if bytes_read > MAX_LINE_LENGTH {
            return Err(BuildError::LineTooLong {
                line_num: line_number,
                max_len: MAX_LINE_LENGTH,
            });
        }
        if line_buffer.trim_start().starts_with("metadata {") {
            entries += 1;
        }
    }

    if entries == 0 {
        return Err(BuildError::EmptyMetadata { path: path.to_owned() });
    }
    Ok(())
}

fn main() -> Result<(), BuildError> {
    for file in PROTO_FILES {
        println!("cargo:rerun-if-changed={}", file);
    }
    println!("cargo:rerun-if-changed={}", METADATA_FILE);

    check_metadata(METADATA_FILE)?;

    protobuf_codegen::Codegen::new()
        .pure()
        .includes(["resources"])
        .inputs(PROTO_FILES)
        .cargo_out_dir("proto_gen")
        .run_from_script();
    Ok(())
}
