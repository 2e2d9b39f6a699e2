//! Permission checking utilities.

use agora_auth::{Principal, Role};
use agora_database::Chat;

use crate::types::ChatError;

/// Who may see a chat: its client, its employee, and the client's commissioners.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatParticipants {
    pub client_id: i64,
    pub employee_id: i64,
    pub commissioner_ids: Vec<i64>,
}

impl ChatParticipants {
    pub fn new(client_id: i64, employee_id: i64, commissioner_ids: Vec<i64>) -> Self {
        Self {
            client_id,
            employee_id,
            commissioner_ids,
        }
    }

    pub fn for_chat(chat: &Chat, commissioner_ids: Vec<i64>) -> Self {
        Self::new(chat.client_id, chat.employee_id, commissioner_ids)
    }

    fn is_direct_party(&self, principal: &Principal) -> bool {
        principal.is(Role::Client, self.client_id) || principal.is(Role::Employee, self.employee_id)
    }
}

/// Which column a by-user chat lookup may match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantSide {
    Client,
    Employee,
    Either,
}

/// Permission checking utilities
pub struct PermissionChecker;

impl PermissionChecker {
    /// Check if a principal can read a chat's messages
    pub fn can_read_chat(
        principal: &Principal,
        participants: &ChatParticipants,
    ) -> Result<(), ChatError> {
        if participants.is_direct_party(principal) {
            return Ok(());
        }

        if principal.role == Role::Commissioner
            && participants.commissioner_ids.contains(&principal.id)
        {
            return Ok(());
        }

        Err(ChatError::access_denied(
            "You do not have access to this chat",
        ))
    }

    /// Check if a principal can post into a chat. Commissioners are read-only.
    pub fn can_send_message(
        principal: &Principal,
        participants: &ChatParticipants,
    ) -> Result<(), ChatError> {
        if principal.is_admin() || participants.is_direct_party(principal) {
            return Ok(());
        }

        Err(ChatError::access_denied(
            "You do not have permission to send messages in this chat",
        ))
    }

    pub fn can_list_all_chats(principal: &Principal) -> Result<(), ChatError> {
        if !principal.is_admin() {
            return Err(ChatError::access_denied("Only admins can list every chat"));
        }
        Ok(())
    }

    /// Admins may look up any id on either side. Clients and employees only
    /// themselves, and only on their own side. Commissioners take no part in chats.
    pub fn can_list_chats_of(
        principal: &Principal,
        user_id: i64,
    ) -> Result<ParticipantSide, ChatError> {
        match principal.role {
            Role::Admin => Ok(ParticipantSide::Either),
            Role::Client if principal.id == user_id => Ok(ParticipantSide::Client),
            Role::Employee if principal.id == user_id => Ok(ParticipantSide::Employee),
            Role::Commissioner => Err(ChatError::access_denied(
                "Commissioners cannot list chats by user",
            )),
            _ => Err(ChatError::access_denied(
                "You can only list your own chats",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat_5_9(commissioners: Vec<i64>) -> ChatParticipants {
        ChatParticipants::new(5, 9, commissioners)
    }

    #[test]
    fn test_client_of_chat_can_read() {
        let client = Principal::new(5, Role::Client, "client");
        assert!(PermissionChecker::can_read_chat(&client, &chat_5_9(vec![])).is_ok());
    }

    #[test]
    fn test_stranger_cannot_read() {
        let stranger = Principal::new(7, Role::Client, "stranger");
        let result = PermissionChecker::can_read_chat(&stranger, &chat_5_9(vec![]));
        assert!(matches!(result, Err(ChatError::AccessDenied { .. })));
    }

    #[test]
    fn test_employee_of_chat_can_read_and_send() {
        let employee = Principal::new(9, Role::Employee, "employee");
        let participants = chat_5_9(vec![]);
        assert!(PermissionChecker::can_read_chat(&employee, &participants).is_ok());
        assert!(PermissionChecker::can_send_message(&employee, &participants).is_ok());
    }

    #[test]
    fn test_ids_are_compared_within_role() {
        // Employee 5 is not client 5.
        let employee = Principal::new(5, Role::Employee, "employee");
        let participants = chat_5_9(vec![5]);
        assert!(PermissionChecker::can_read_chat(&employee, &participants).is_err());
        assert!(PermissionChecker::can_send_message(&employee, &participants).is_err());
    }

    #[test]
    fn test_linked_commissioner_reads_but_cannot_send() {
        let commissioner = Principal::new(12, Role::Commissioner, "commissioner");
        let participants = chat_5_9(vec![12]);

        assert!(PermissionChecker::can_read_chat(&commissioner, &participants).is_ok());
        assert!(PermissionChecker::can_send_message(&commissioner, &participants).is_err());
    }

    #[test]
    fn test_unlinked_commissioner_cannot_read() {
        let commissioner = Principal::new(13, Role::Commissioner, "commissioner");
        assert!(PermissionChecker::can_read_chat(&commissioner, &chat_5_9(vec![12])).is_err());
    }

    #[test]
    fn test_admin_can_send_but_is_not_a_reader() {
        let admin = Principal::new(1, Role::Admin, "admin");
        let participants = chat_5_9(vec![]);
        assert!(PermissionChecker::can_send_message(&admin, &participants).is_ok());
        assert!(PermissionChecker::can_read_chat(&admin, &participants).is_err());
    }

    #[test]
    fn test_listing_rules() {
        let admin = Principal::new(1, Role::Admin, "admin");
        let client = Principal::new(5, Role::Client, "client");

        assert!(PermissionChecker::can_list_all_chats(&admin).is_ok());
        assert!(PermissionChecker::can_list_all_chats(&client).is_err());
        assert_eq!(
            PermissionChecker::can_list_chats_of(&admin, 42).unwrap(),
            ParticipantSide::Either
        );
        assert_eq!(
            PermissionChecker::can_list_chats_of(&client, 5).unwrap(),
            ParticipantSide::Client
        );
        assert!(PermissionChecker::can_list_chats_of(&client, 6).is_err());
    }

    #[test]
    fn test_list_by_user_stays_on_own_side() {
        let employee = Principal::new(5, Role::Employee, "employee");
        assert_eq!(
            PermissionChecker::can_list_chats_of(&employee, 5).unwrap(),
            ParticipantSide::Employee
        );

        // Commissioner 5 shares an id with client 5 but is neither a client nor an employee.
        let commissioner = Principal::new(5, Role::Commissioner, "commissioner");
        assert!(matches!(
            PermissionChecker::can_list_chats_of(&commissioner, 5),
            Err(ChatError::AccessDenied { .. })
        ));
    }
}
