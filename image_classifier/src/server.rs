use crate::{
    config::{Config, ServerConfig, Validatable},
    error::ClassifierError,
    inference_service::InferenceService,
    model_service::ModelService,
    static_service::StaticModelService,
};
use classifier_proto::{
    image_classifier_server::{ImageClassifierServer, SERVICE_NAME},
    FILE_DESCRIPTOR_SET,
};
use std::{future::Future, net::SocketAddr};
use tokio::{net::TcpListener, signal};
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::server::Router;
use tonic::transport::Server;
use tonic_health::{server::HealthReporter, ServingStatus};

pub struct GrpcServer {
    router: Router,
    health_reporter: HealthReporter,
    addr: String,
}

impl GrpcServer {
    pub async fn new(
        model_service: impl ModelService,
        config: &ServerConfig,
    ) -> Result<Self, ClassifierError> {
        config.validate()?;

        let inference_service = InferenceService::new(model_service, config.max_workers);
        let reflection_service = tonic_reflection::server::Builder::configure()
            .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
            .build_v1alpha()?;

        let (health_reporter, health_service) = tonic_health::server::health_reporter();
        health_reporter
            .set_service_status(SERVICE_NAME, ServingStatus::Serving)
            .await;

        let router = Server::builder()
            .add_service(health_service)
            .add_service(reflection_service)
            .add_service(ImageClassifierServer::new(inference_service));

        Ok(Self {
            router,
            health_reporter,
            addr: config.get_address(),
        })
    }

    pub async fn run(self) -> Result<(), ClassifierError> {
        let addr: SocketAddr = self.addr.parse()?;

        tracing::info!("Image classifier listening on {}", addr);

        let shutdown = drain(self.health_reporter, shutdown_signal());
        self.router.serve_with_shutdown(addr, shutdown).await?;

        tracing::info!("Image classifier stopped");
        Ok(())
    }

    /// Serves on an already bound listener until `signal` resolves.
    pub async fn run_with_listener<F>(
        self,
        listener: TcpListener,
        signal: F,
    ) -> Result<(), ClassifierError>
    where
        F: Future<Output = ()>,
    {
        let shutdown = drain(self.health_reporter, signal);
        self.router
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
            .await?;

        Ok(())
    }
}

pub async fn start_server(config: Config) -> Result<(), ClassifierError> {
    tracing::info!(
        "Starting image classifier with {} workers",
        config.server.max_workers
    );

    let grpc_server = GrpcServer::new(StaticModelService::new(), &config.server).await?;
    grpc_server.run().await
}

async fn drain(health_reporter: HealthReporter, signal: impl Future<Output = ()>) {
    signal.await;
    tracing::info!("Shutdown signal received, starting graceful shutdown");

    health_reporter
        .set_service_status(SERVICE_NAME, ServingStatus::NotServing)
        .await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_config(max_workers: usize) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_workers,
        }
    }

    #[tokio::test]
    async fn test_new_rejects_zero_workers() {
        let result = GrpcServer::new(StaticModelService::new(), &server_config(0)).await;

        assert!(matches!(result, Err(ClassifierError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_new_accepts_positive_workers() {
        let result = GrpcServer::new(StaticModelService::new(), &server_config(1)).await;

        assert!(result.is_ok());
    }
}
