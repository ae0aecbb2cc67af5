//! One task per line: `<kind> | <done> | <description>[ | <timing>]`.

use crate::error::DecodeError;
use crate::model::{Task, TaskDetail, TaskKind, Timing};

pub const FIELD_DELIMITER: &str = " | ";

pub fn encode(task: &Task) -> String {
    let done = if task.is_done() { "1" } else { "0" };
    let mut line = [task.kind().tag(), done, task.description()].join(FIELD_DELIMITER);
    if let Some(timing) = task.timing() {
        line.push_str(FIELD_DELIMITER);
        line.push_str(timing.as_str());
    }
    line
}

pub fn decode(line: &str) -> Result<Task, DecodeError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut fields = line.splitn(3, FIELD_DELIMITER);
    let tag = fields.next().unwrap_or_default();
    let (Some(done), Some(rest)) = (fields.next(), fields.next()) else {
        return Err(DecodeError::malformed("expected at least 3 fields"));
    };

    let kind = TaskKind::from_tag(tag)
        .ok_or_else(|| DecodeError::malformed(format!("unknown kind tag '{tag}'")))?;
    let done = match done {
        "1" => true,
        "0" => false,
        other => {
            return Err(DecodeError::malformed(format!(
                "done flag must be 1 or 0, got '{other}'"
            )));
        }
    };

    // Timing never contains the delimiter, so it is always the last field.
    let (description, detail) = match kind {
        TaskKind::Todo => (rest, TaskDetail::Todo),
        TaskKind::Deadline => {
            let (description, timing) = split_timing(rest)?;
            (description, TaskDetail::Deadline { by: timing })
        }
        TaskKind::Event => {
            let (description, timing) = split_timing(rest)?;
            (description, TaskDetail::Event { at: timing })
        }
    };

    if description.trim().is_empty() {
        return Err(DecodeError::malformed("description is empty"));
    }

    Ok(Task::new(description, detail).with_done(done))
}

fn split_timing(rest: &str) -> Result<(&str, Timing), DecodeError> {
    let (description, timing) = rest
        .rsplit_once(FIELD_DELIMITER)
        .ok_or_else(|| DecodeError::malformed("missing timing field"))?;
    let timing = Timing::parse(timing)
        .map_err(|_| DecodeError::malformed(format!("invalid timing '{timing}'")))?;
    Ok((description, timing))
}

#[cfg(test)]
mod tests {
    use super::{decode, encode};
    use crate::error::DecodeError;
    use crate::model::{Task, Timing};

    fn timing(raw: &str) -> Timing {
        Timing::parse(raw).unwrap()
    }

    #[test]
    fn encodes_each_kind() {
        assert_eq!(encode(&Task::todo("borrow book")), "T | 0 | borrow book");
        assert_eq!(
            encode(&Task::deadline("return book", timing("2/12/2019 1800")).with_done(true)),
            "D | 1 | return book | 2/12/2019 1800"
        );
        assert_eq!(
            encode(&Task::event("meeting", timing("6/8/2019"))),
            "E | 0 | meeting | 6/8/2019"
        );
    }

    #[test]
    fn decode_reverses_encode() {
        let tasks = [
            Task::todo("borrow book"),
            Task::todo("done thing").with_done(true),
            Task::deadline("return book", timing("2/12/2019 1800")),
            Task::event("project meeting", timing("6/8/2019 1400")).with_done(true),
            Task::todo("pipes | inside | text"),
            Task::deadline("a | b", timing("1/1/2020")),
        ];

        for task in tasks {
            assert_eq!(decode(&encode(&task)), Ok(task));
        }
    }

    #[test]
    fn delimiter_fragments_round_trip_for_every_kind() {
        let descriptions = ["|", "a | b", "| lead", "trail |", "a |", " | ", "café ☕ 日本"];

        for description in descriptions {
            for done in [false, true] {
                let tasks = [
                    Task::todo(description),
                    Task::deadline(description, timing("2/12/2019 1800")),
                    Task::event(description, timing("6/8/2019")),
                ];
                for task in tasks {
                    let task = task.with_done(done);
                    let line = encode(&task);
                    assert_eq!(decode(&line), Ok(task), "line {line:?}");
                }
            }
        }
    }

    #[test]
    fn deadline_with_trailing_pipe_keeps_it_in_description() {
        let task = Task::deadline("a |", timing("1/1/2020"));
        let line = encode(&task);

        assert_eq!(line, "D | 0 | a | | 1/1/2020");
        let decoded = decode(&line).unwrap();
        assert_eq!(decoded.description(), "a |");
        assert_eq!(decoded.timing().map(Timing::as_str), Some("1/1/2020"));
    }

    #[test]
    fn decode_tolerates_crlf() {
        assert_eq!(decode("T | 0 | x\r"), Ok(Task::todo("x")));
    }

    #[test]
    fn decode_rejects_missing_fields() {
        assert!(matches!(decode("T | 0"), Err(DecodeError::Malformed(_))));
        assert!(matches!(
            decode("D | 0 | read book"),
            Err(DecodeError::Malformed(_))
        ));
        assert!(matches!(decode(""), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn decode_rejects_unknown_tag_and_flag() {
        assert!(matches!(decode("X | 0 | x"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode("T | yes | x"), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn decode_rejects_bad_timing_and_empty_description() {
        assert!(matches!(
            decode("E | 0 | party | someday"),
            Err(DecodeError::Malformed(_))
        ));
        assert!(matches!(decode("T | 0 |  "), Err(DecodeError::Malformed(_))));
        assert!(matches!(
            decode("D | 0 |  | 1/1/2020"),
            Err(DecodeError::Malformed(_))
        ));
    }
}
