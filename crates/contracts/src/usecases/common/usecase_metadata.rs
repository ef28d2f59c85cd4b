/// Метаданные UseCase для идентификации и отображения в UI
pub trait UseCaseMetadata {
    /// Index, e.g. "u601"
    fn usecase_index() -> &'static str;

    /// Technical name, e.g. "pdf_chat"
    fn usecase_name() -> &'static str;

    /// Title shown in the UI header
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// Full name like "u601_pdf_chat"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy;

    impl UseCaseMetadata for Dummy {
        fn usecase_index() -> &'static str {
            "u999"
        }
        fn usecase_name() -> &'static str {
            "dummy"
        }
        fn display_name() -> &'static str {
            "Dummy"
        }
    }

    #[test]
    fn full_name_joins_index_and_name() {
        assert_eq!(Dummy::full_name(), "u999_dummy");
        assert_eq!(Dummy::description(), "");
    }
}
