use std::str::FromStr;

use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::signer::Signer;
use solana_sdk::system_instruction;
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;

use crate::core::error::WalletError;
use crate::core::pda::associated_token_address;
use crate::rpc::WalletRpc;
use crate::token::amount::ui_amount_to_amount;

/// What is being sent: the native asset, or units held in a token account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransferAsset {
    Native,
    Token { account: Pubkey, mint: Pubkey },
}

/// Validated, ready-to-submit transfer: the ordered instruction list plus the
/// resolved recipient and base-unit amount.
#[derive(Clone, Debug)]
pub struct TransferPlan {
    pub recipient: Pubkey,
    pub amount: u64,
    pub instructions: Vec<Instruction>,
}

/// Build the instruction sequence for a transfer.
///
/// Recipient text must parse as a base58 address (`InvalidRecipient`), amount
/// text goes through floor-on-truncation scaling (`InvalidAmount`); a caller
/// with no valid plan disables its submit action instead of reusing a stale
/// one. Token transfers get an idempotent create of the recipient's
/// associated token account followed by a checked transfer; the decimals are
/// passed through exactly as supplied so the execution layer can reject a
/// mismatch against the mint.
pub fn plan_transfer(
    sender: &Pubkey,
    asset: &TransferAsset,
    recipient: &str,
    ui_amount: &str,
    decimals: Option<u8>,
) -> Result<TransferPlan, WalletError> {
    let recipient = Pubkey::from_str(recipient.trim())
        .map_err(|_| WalletError::invalid_recipient(recipient))?;
    let amount = ui_amount_to_amount(ui_amount, decimals)?;

    let instructions = match asset {
        TransferAsset::Native => {
            vec![system_instruction::transfer(sender, &recipient, amount)]
        }
        TransferAsset::Token { account, mint } => {
            let recipient_ata = associated_token_address(&recipient, mint);
            let create_ata =
                create_associated_token_account_idempotent(sender, &recipient, mint, &spl_token::id());
            let transfer = spl_token::instruction::transfer_checked(
                &spl_token::id(),
                account,
                mint,
                &recipient_ata,
                sender,
                &[],
                amount,
                decimals.unwrap_or(0),
            )
            .map_err(|err| WalletError::Instruction(err.to_string()))?;
            vec![create_ata, transfer]
        }
    };

    Ok(TransferPlan {
        recipient,
        amount,
        instructions,
    })
}

/// Sign and submit a planned transfer, returning the transaction signature.
pub async fn send_transfer(
    rpc: &WalletRpc,
    signer: &dyn Signer,
    plan: &TransferPlan,
) -> Result<Signature, WalletError> {
    rpc.send_instructions(&plan.instructions, signer).await
}

/// One successfully submitted transfer, as shown back to the user.
#[derive(Clone, Debug)]
pub struct TransferRecord {
    pub signature: Signature,
    pub ui_amount: String,
    pub recipient: Pubkey,
}

/// Append-only, in-memory transfer log for the current session. Not
/// persisted across restarts.
#[derive(Debug, Default)]
pub struct TransferHistory {
    records: Vec<TransferRecord>,
}

impl TransferHistory {
    pub fn push(&mut self, signature: Signature, ui_amount: impl Into<String>, recipient: Pubkey) {
        self.records.push(TransferRecord {
            signature,
            ui_amount: ui_amount.into(),
            recipient,
        });
    }

    pub fn records(&self) -> &[TransferRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSFER_CHECKED_TAG: u8 = 12;

    fn token_asset() -> TransferAsset {
        TransferAsset::Token {
            account: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
        }
    }

    #[test]
    fn rejects_unparseable_recipient() {
        let sender = Pubkey::new_unique();
        for recipient in ["", "not-an-address", "0x1234"] {
            assert!(matches!(
                plan_transfer(&sender, &TransferAsset::Native, recipient, "1", Some(9)),
                Err(WalletError::InvalidRecipient(_))
            ));
        }
    }

    #[test]
    fn rejects_unparseable_amount() {
        let sender = Pubkey::new_unique();
        let recipient = Pubkey::new_unique().to_string();
        assert!(matches!(
            plan_transfer(&sender, &TransferAsset::Native, &recipient, "1.2.3", Some(9)),
            Err(WalletError::InvalidAmount(_))
        ));
    }

    #[test]
    fn native_transfer_is_a_single_system_instruction() {
        let sender = Pubkey::new_unique();
        let recipient = Pubkey::new_unique();
        let plan = plan_transfer(
            &sender,
            &TransferAsset::Native,
            &recipient.to_string(),
            "1.5",
            Some(9),
        )
        .unwrap();

        assert_eq!(plan.amount, 1_500_000_000);
        assert_eq!(plan.instructions.len(), 1);
        let instruction = &plan.instructions[0];
        assert_eq!(instruction.program_id, solana_sdk::system_program::id());
        // SystemInstruction::Transfer: u32 variant tag then lamports
        assert_eq!(&instruction.data[4..12], &plan.amount.to_le_bytes());
    }

    #[test]
    fn token_transfer_is_idempotent_create_then_checked_transfer() {
        let sender = Pubkey::new_unique();
        let recipient = Pubkey::new_unique();
        let asset = token_asset();
        let plan = plan_transfer(&sender, &asset, &recipient.to_string(), "2", Some(6)).unwrap();

        assert_eq!(plan.instructions.len(), 2);
        let create = &plan.instructions[0];
        assert_eq!(create.program_id, spl_associated_token_account::id());
        // idempotent variant of the create instruction
        assert_eq!(create.data, vec![1]);

        let transfer = &plan.instructions[1];
        assert_eq!(transfer.program_id, spl_token::id());
        assert_eq!(transfer.data[0], TRANSFER_CHECKED_TAG);
        assert_eq!(&transfer.data[1..9], &2_000_000u64.to_le_bytes());
        assert_eq!(transfer.data[9], 6);
    }

    #[test]
    fn decimals_pass_through_unchanged() {
        let sender = Pubkey::new_unique();
        let recipient = Pubkey::new_unique();
        let asset = token_asset();
        // Caller-asserted decimals land in the instruction as supplied; the
        // execution layer is what rejects a mint mismatch.
        for decimals in [0u8, 3, 9] {
            let plan = plan_transfer(
                &sender,
                &asset,
                &recipient.to_string(),
                "1",
                Some(decimals),
            )
            .unwrap();
            assert_eq!(plan.instructions[1].data[9], decimals);
        }
    }

    #[test]
    fn history_is_append_only() {
        let mut history = TransferHistory::default();
        let recipient = Pubkey::new_unique();
        history.push(Signature::default(), "1.5", recipient);
        history.push(Signature::default(), "2", recipient);
        assert_eq!(history.records().len(), 2);
        assert_eq!(history.records()[0].ui_amount, "1.5");
    }
}
