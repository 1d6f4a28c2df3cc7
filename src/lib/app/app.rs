use crate::app::{ApplicationOutput, ClientConfig};
use crate::change::TwinChange;
use crate::error::Error;
use crate::event::{ChangeMapper, TwinEventMapper};
use crate::output::Output;
use crate::transport::{create_transport, WebSocketSource};
use crate::twin::{ConsumptionOptions, TwinClient};

use serde_json::json;
use tokio::io::stdout;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

pub enum ApplicationCommand {
    Check(ClientConfig),
    Watch(ClientConfig, ApplicationOutput),
}

pub struct Application<M = TwinEventMapper>
where
    M: ChangeMapper<TwinChange>,
{
    mapper: M,
}

async fn write_to_stdout(output: &ApplicationOutput, change: TwinChange) -> Result<(), Error> {
    let mut stdout = stdout();

    output.write(&mut stdout, change).await?;

    Ok(())
}

fn create_writer(
    output: ApplicationOutput,
    mut receiver: UnboundedReceiver<TwinChange>,
) -> JoinHandle<Result<(), Error>> {
    tokio::spawn(async move {
        while let Some(change) = receiver.recv().await {
            write_to_stdout(&output, change).await?;
        }

        Ok(())
    })
}

impl Application {
    pub fn new() -> Self {
        Self {
            mapper: TwinEventMapper,
        }
    }
}

impl<M> Application<M>
where
    M: ChangeMapper<TwinChange>,
{
    pub fn with_mapper<T>(self, mapper: T) -> Application<T>
    where
        T: ChangeMapper<TwinChange>,
    {
        Application { mapper }
    }

    async fn run_watch(
        self,
        config: ClientConfig,
        output: ApplicationOutput,
    ) -> Result<(), Error> {
        let transport = create_transport(config.proxy(), config.trust_store())?;
        let source = WebSocketSource::connect(config.endpoint().as_str(), transport).await?;

        let mut client = TwinClient::new(source).with_mapper(self.mapper);
        let (_subscription, receiver) = client.register_for_changes();

        let writer = create_writer(output, receiver);

        let options = ConsumptionOptions::new()
            .with_namespaces(config.namespaces().iter().map(String::as_str));

        client.start_consumption_with(options).await?;

        writer.await.map_err(|_| Error::Synchronization)?
    }

    pub async fn run(self, command: ApplicationCommand) -> Result<(), Error> {
        match command {
            ApplicationCommand::Check(config) => {
                let transport = create_transport(config.proxy(), config.trust_store())?;

                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "endpoint": config.endpoint().as_str(),
                        "secure": config.endpoint().is_secure(),
                        "proxy": transport
                            .proxy()
                            .map(|route| format!("{}:{}", route.host(), route.port())),
                        "tls": transport.has_tls(),
                    }))?
                );
            }
            ApplicationCommand::Watch(config, output) => self.run_watch(config, output).await?,
        };

        Ok(())
    }
}
