use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;

use crate::{GenerationClient, GenerationError};

/// Replays queued replies in order and remembers every prompt it was sent.
///
/// Once the queue runs dry every call fails with
/// [`GenerationError::Unexpected`].
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, raw: impl Into<String>) -> Self {
        locked(&self.replies).push_back(Ok(raw.into()));
        self
    }

    pub fn fail(self, err: GenerationError) -> Self {
        locked(&self.replies).push_back(Err(err));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        locked(&self.prompts).clone()
    }
}

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl GenerationClient for ScriptedClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        locked(&self.prompts).push(prompt.to_owned());
        locked(&self.replies)
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::Unexpected("no scripted reply".to_owned())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_in_order_then_runs_dry() {
        let client = ScriptedClient::new()
            .reply("first")
            .fail(GenerationError::Connect("refused".to_owned()));

        assert_eq!(client.generate("a").await.unwrap(), "first");
        assert!(matches!(
            client.generate("b").await,
            Err(GenerationError::Connect(_))
        ));
        assert!(matches!(
            client.generate("c").await,
            Err(GenerationError::Unexpected(_))
        ));
        assert_eq!(client.prompts(), vec!["a", "b", "c"]);
    }
}
