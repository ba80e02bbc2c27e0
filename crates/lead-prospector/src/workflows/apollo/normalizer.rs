/// Canonical form for free-text export cells: invisible marks dropped,
/// whitespace collapsed, lowercased.
pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}', '\u{200c}', '\u{200d}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

pub(crate) fn normalize_email(value: &str) -> String {
    normalize_label(value).replace(' ', "")
}

/// Accepts `local@domain.tld` with no blank label around the dots.
pub(crate) fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || value.chars().any(char::is_whitespace) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_invisible_marks_and_case() {
        let source = "\u{feff}Information  Technology \u{200b}& Services";
        assert_eq!(normalize_label(source), "information technology & services");
        assert_eq!(normalize_label("Saúde"), "saúde");
        assert_eq!(normalize_email(" Ana.Souza@Empresa.COM.br "), "ana.souza@empresa.com.br");
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ana@empresa.com.br"));
        assert!(!is_valid_email("ana@empresa"));
        assert!(!is_valid_email("@empresa.com"));
        assert!(!is_valid_email("ana@@empresa.com"));
        assert!(!is_valid_email("ana@empresa..com"));
        assert!(!is_valid_email("ana souza@empresa.com"));
        assert!(!is_valid_email("empresa.com"));
    }
}
