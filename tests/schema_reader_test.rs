/// スキーマ記述ファイルの読み込みテスト
///
/// 実ファイルを経由して、ノイズ行の除外・大文字小文字の正規化・
/// 宣言順の保持を確認します。

use std::fs;
use tempfile::TempDir;

#[cfg(test)]
mod schema_reader_tests {
    use super::*;
    use checkdb::core::descriptor::ForeignKey;
    use checkdb::services::schema_file_reader::SchemaFileReader;
    use checkdb::services::schema_line_parser::{split_top_level, SchemaLineParser};

    #[test]
    fn test_reader_example_yields_two_tables() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("db1.txt");
        fs::write(
            &path,
            "T1(id(pk), v)\n-----\n# comment\nT2(id(pk), t1id(fk:T1.id))\n",
        )
        .unwrap();

        let tables = SchemaFileReader::new().parse_file(&path).unwrap();

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].name, "t1");
        assert_eq!(tables[1].name, "t2");
        assert_eq!(
            tables[1].foreign_keys,
            vec![ForeignKey::new("t1id".to_string(), "t1".to_string(), "id".to_string())]
        );
    }

    #[test]
    fn test_reader_handles_crlf_and_bom() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("db2.txt");
        fs::write(
            &path,
            "\u{feff}db2.txt\r\n// header\r\nStudent(sid(pk), name)\r\n-- Course(cid(pk))\r\n",
        )
        .unwrap();

        let tables = SchemaFileReader::new().parse_file(&path).unwrap();

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "student");
        assert_eq!(tables[0].columns, vec!["sid", "name"]);
    }

    #[test]
    fn test_depth_aware_split() {
        assert_eq!(
            split_top_level("id(pk), data(fk:Other.id), note"),
            vec!["id(pk)", "data(fk:Other.id)", "note"]
        );
    }

    #[test]
    fn test_case_folding_equivalence() {
        let parser = SchemaLineParser::new();
        assert_eq!(
            parser.parse_line("Orders(ID(pk))"),
            parser.parse_line("orders(id(pk))")
        );
    }
}
