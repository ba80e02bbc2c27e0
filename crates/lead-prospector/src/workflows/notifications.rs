//! Toast-style confirmations emitted after user actions.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
}

/// User actions that produce a confirmation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    CriteriaSaved,
    CriteriaEmpty,
    RulesSaved,
    SourceToggled,
    ApiKeySaved,
    ConnectionTesting,
    ConnectionSucceeded,
    ProspectingStarted,
    ProspectingStopped,
    ProspectingCompleted { leads: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn for_action(action: NotificationAction) -> Self {
        let (title, description, level) = match action {
            NotificationAction::CriteriaSaved => (
                "Configuração Salva",
                "Os critérios de prospecção foram atualizados com sucesso.".to_string(),
                NotificationLevel::Success,
            ),
            NotificationAction::CriteriaEmpty => (
                "Critérios Incompletos",
                "Preencha ao menos um critério de prospecção antes de salvar.".to_string(),
                NotificationLevel::Warning,
            ),
            NotificationAction::RulesSaved => (
                "Regras de Qualificação Atualizadas",
                "As novas configurações de scoring foram salvas com sucesso.".to_string(),
                NotificationLevel::Success,
            ),
            NotificationAction::SourceToggled => (
                "Fonte Atualizada",
                "A configuração da fonte de dados foi alterada.".to_string(),
                NotificationLevel::Info,
            ),
            NotificationAction::ApiKeySaved => (
                "API Key Salva",
                "A chave de API foi configurada com sucesso.".to_string(),
                NotificationLevel::Success,
            ),
            NotificationAction::ConnectionTesting => (
                "Testando Conexão",
                "Verificando conectividade com a fonte de dados...".to_string(),
                NotificationLevel::Info,
            ),
            NotificationAction::ConnectionSucceeded => (
                "Conexão Bem-sucedida",
                "A fonte de dados está funcionando corretamente.".to_string(),
                NotificationLevel::Success,
            ),
            NotificationAction::ProspectingStarted => (
                "Prospecção Iniciada",
                "O agente está buscando leads com base nos seus critérios.".to_string(),
                NotificationLevel::Info,
            ),
            NotificationAction::ProspectingStopped => (
                "Prospecção Interrompida",
                "O processo foi pausado com segurança.".to_string(),
                NotificationLevel::Warning,
            ),
            NotificationAction::ProspectingCompleted { leads } => (
                "Prospecção Concluída!",
                format!(
                    "{leads} novos leads qualificados foram encontrados e adicionados ao seu CRM."
                ),
                NotificationLevel::Success,
            ),
        };

        Self {
            title: title.to_string(),
            description,
            level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_message_carries_lead_count() {
        let notification =
            Notification::for_action(NotificationAction::ProspectingCompleted { leads: 47 });
        assert_eq!(notification.title, "Prospecção Concluída!");
        assert!(notification.description.starts_with("47 novos leads"));
        assert_eq!(notification.level, NotificationLevel::Success);
    }

    #[test]
    fn empty_criteria_is_a_warning() {
        let notification = Notification::for_action(NotificationAction::CriteriaEmpty);
        assert_eq!(notification.level, NotificationLevel::Warning);
    }
}
