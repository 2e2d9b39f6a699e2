use anyhow::Context;
use agora_auth::{hash_password, Principal, Role};
use agora_config::load as load_config;
use agora_database::{
    ChatRepository, ClientRepository, CommissionerRepository, CreateChatRequest,
    CreateClientRequest, CreateCommissionerRequest, CreateEmployeeRequest,
    CreateMessageRequest, CreateOrderRequest, EmployeeRepository, MessageRepository,
    OrderRepository, ServiceItemRepository,
};
use agora_gateway::{build_router, AppState};
use agora_runtime::{telemetry, BackendServices};
use clap::{Parser, Subcommand};
use sqlx::Row;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "agora")]
#[command(about = "Agora marketplace backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Seed the database with demo clients, employees, chats and commissioners
    SeedData,
    /// Print clients, chats and commissioners from the database
    DumpData,
    /// Issue a signed token for local testing
    IssueToken {
        #[arg(long)]
        user_id: i64,
        /// One of CLIENT, EMPLOYEE, COMMISSIONER or ADMIN
        #[arg(long)]
        role: String,
        #[arg(long, default_value = "Local User")]
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::SeedData => seed_data().await,
        Commands::DumpData => dump_data().await,
        Commands::IssueToken {
            user_id,
            role,
            name,
        } => issue_token(user_id, &role, name).await,
    }
}

async fn bootstrap() -> anyhow::Result<(agora_config::AppConfig, BackendServices)> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    let config = load_config().context("failed to load configuration")?;
    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    Ok((config, services))
}

async fn run_server() -> anyhow::Result<()> {
    let (config, services) = bootstrap().await?;
    info!("starting Agora backend");

    let state = AppState::new(services.db_pool.clone(), &config);
    let app = build_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(agora_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn seed_data() -> anyhow::Result<()> {
    let (_, services) = bootstrap().await?;
    let pool = services.db_pool.clone();

    info!("seeding database with demo data");

    let clients = ClientRepository::new(pool.clone());
    let alice = clients
        .create(&CreateClientRequest {
            name: "Alice Hartono".into(),
            email: "alice@example.com".into(),
        })
        .await
        .context("failed to insert client alice")?;
    let bima = clients
        .create(&CreateClientRequest {
            name: "Bima Santoso".into(),
            email: "bima@example.com".into(),
        })
        .await
        .context("failed to insert client bima")?;

    let employee = EmployeeRepository::new(pool.clone())
        .create(&CreateEmployeeRequest {
            name: "Citra Lestari".into(),
            email: "citra@example.com".into(),
        })
        .await
        .context("failed to insert employee")?;

    let items = ServiceItemRepository::new(pool.clone());
    let branding = items
        .create("Brand identity package")
        .await
        .context("failed to insert service item")?;
    let website = items
        .create("Company website")
        .await
        .context("failed to insert service item")?;

    let chats = ChatRepository::new(pool.clone());
    let alice_chat = chats
        .create(&CreateChatRequest {
            client_id: alice.id,
            employee_id: employee.id,
            service_item_id: Some(branding.id),
        })
        .await
        .context("failed to insert chat")?;
    chats
        .create(&CreateChatRequest {
            client_id: bima.id,
            employee_id: employee.id,
            service_item_id: Some(website.id),
        })
        .await
        .context("failed to insert chat")?;

    MessageRepository::new(pool.clone())
        .create(&CreateMessageRequest {
            chat_id: alice_chat.id,
            sender: alice.id,
            sender_role: Role::Client.as_str().to_string(),
            content: "Hi, when can we review the first logo drafts?".into(),
        })
        .await
        .context("failed to insert message")?;

    let commissioner = CommissionerRepository::new(pool.clone())
        .create(&CreateCommissionerRequest {
            name: "Dewi Anggraini".into(),
            identity_number: "3174000000000001".into(),
            phone_number: "081200000001".into(),
            password_hash: hash_password("password")?,
            service_item_id: Some(branding.id),
            client_id: alice.id,
        })
        .await
        .context("failed to insert commissioner")?;

    let orders = OrderRepository::new(pool.clone());
    let order = orders
        .create(&CreateOrderRequest {
            client_id: alice.id,
            service_item_id: Some(branding.id),
        })
        .await
        .context("failed to insert order")?;
    orders
        .attach_commissioner(order.id, commissioner.id)
        .await
        .context("failed to attach commissioner to order")?;

    println!("Database seeded with demo data:");
    println!("- 2 clients, 1 employee, 2 service items");
    println!("- 2 chats with 1 message");
    println!(
        "- commissioner {} (phone {}, password 'password') on order {}",
        commissioner.id, commissioner.phone_number, order.id
    );
    println!("Run 'dump-data' to see the inserted data");

    Ok(())
}

async fn dump_data() -> anyhow::Result<()> {
    let (_, services) = bootstrap().await?;

    info!("dumping marketplace data from database");

    println!("=== CLIENTS ===");
    let clients = ClientRepository::new(services.db_pool.clone())
        .list()
        .await
        .context("failed to fetch clients")?;
    if clients.is_empty() {
        println!("No clients found in database");
    } else {
        println!("{:<5} {:<30} {:<30} {:<25}", "ID", "Name", "Email", "Created At");
        println!("{}", "-".repeat(95));
        for client in clients {
            println!(
                "{:<5} {:<30} {:<30} {:<25}",
                client.id, client.name, client.email, client.created_at
            );
        }
    }

    println!("\n=== CHATS ===");
    let chats = ChatRepository::new(services.db_pool.clone())
        .list_all()
        .await
        .context("failed to fetch chats")?;
    if chats.is_empty() {
        println!("No chats found in database");
    } else {
        println!(
            "{:<5} {:<25} {:<25} {:<30} {:<25}",
            "ID", "Client", "Employee", "Service Item", "Created At"
        );
        println!("{}", "-".repeat(115));
        for chat in chats {
            println!(
                "{:<5} {:<25} {:<25} {:<30} {:<25}",
                chat.id,
                chat.client_name,
                chat.employee_name,
                chat.service_item_name.as_deref().unwrap_or("NULL"),
                chat.created_at
            );
        }
    }

    println!("\n=== MESSAGES ===");
    let messages = sqlx::query(
        r#"
        SELECT id, chat_id, sender, sender_role, content, created_at
        FROM messages
        ORDER BY chat_id ASC, created_at ASC, id ASC
        "#,
    )
    .fetch_all(&services.db_pool)
    .await
    .context("failed to fetch messages")?;
    if messages.is_empty() {
        println!("No messages found in database");
    } else {
        println!(
            "{:<5} {:<8} {:<8} {:<14} {:<50} {:<25}",
            "ID", "Chat", "Sender", "Role", "Content (truncated)", "Created At"
        );
        println!("{}", "-".repeat(115));
        for message in messages {
            let content: String = message.get("content");
            let content_display = if content.chars().count() > 47 {
                format!("{}...", content.chars().take(44).collect::<String>())
            } else {
                content
            };
            println!(
                "{:<5} {:<8} {:<8} {:<14} {:<50} {:<25}",
                message.get::<i64, _>("id"),
                message.get::<i64, _>("chat_id"),
                message.get::<i64, _>("sender"),
                message.get::<String, _>("sender_role"),
                content_display,
                message.get::<String, _>("created_at")
            );
        }
    }

    println!("\n=== COMMISSIONERS ===");
    let commissioners = sqlx::query(
        r#"
        SELECT c.id, c.name, c.phone_number, c.client_id,
               (SELECT COUNT(*) FROM order_commissioners oc WHERE oc.commissioner_id = c.id) AS orders
        FROM commissioners c
        ORDER BY c.id ASC
        "#,
    )
    .fetch_all(&services.db_pool)
    .await
    .context("failed to fetch commissioners")?;
    if commissioners.is_empty() {
        println!("No commissioners found in database");
    } else {
        println!(
            "{:<5} {:<30} {:<16} {:<8} {:<8}",
            "ID", "Name", "Phone", "Client", "Orders"
        );
        println!("{}", "-".repeat(70));
        for row in commissioners {
            println!(
                "{:<5} {:<30} {:<16} {:<8} {:<8}",
                row.get::<i64, _>("id"),
                row.get::<String, _>("name"),
                row.get::<String, _>("phone_number"),
                row.get::<i64, _>("client_id"),
                row.get::<i64, _>("orders")
            );
        }
    }

    Ok(())
}

async fn issue_token(user_id: i64, role: &str, name: String) -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;
    let role: Role = role.parse()?;
    let tokens = agora_auth::TokenManager::from_config(&config.auth);

    let token = tokens.issue(&Principal::new(user_id, role, name))?;
    println!("{token}");
    Ok(())
}
