use repofetch::core::RepofetchResult;
use repofetch::di::ServiceContainer;
use repofetch::github::{ActivityLookup, ActivityQuery, ContributorActivity};
use std::collections::BTreeMap;

pub struct ContributorsArgs {
    pub owner: String,
    pub repository: String,
    pub contributor: Option<String>,
    pub token: Option<String>,
    pub json: bool,
}

pub async fn run(container: &ServiceContainer, args: ContributorsArgs) -> RepofetchResult<()> {
    let mut query = ActivityQuery::new(&args.owner, &args.repository);
    if let Some(login) = args.contributor {
        query = query.contributor(login);
    }
    if let Some(token) = args.token {
        query = query.token(token);
    }
    let full_name = query.full_name();

    let lookup = container
        .activity_provider()
        .contributors_last_activities(query)
        .await?;

    if args.json {
        // `null` when nothing was found, like the library contract
        if let ActivityLookup::Failed(e) = &lookup {
            eprintln!("Warning: {}", e);
        }
        println!("{}", serde_json::to_string_pretty(&lookup.into_option())?);
        return Ok(());
    }

    match lookup {
        ActivityLookup::Found(activities) => print!("{}", format_activities(&activities)),
        ActivityLookup::NotFound => println!("Repository {} not found", full_name),
        ActivityLookup::Failed(e) => {
            println!("Could not fetch contributors of {}", full_name);
            eprintln!("Warning: {}", e);
        }
    }
    Ok(())
}

fn format_activities(activities: &BTreeMap<String, ContributorActivity>) -> String {
    if activities.is_empty() {
        return "No contributors found\n".to_string();
    }

    let width = activities.keys().map(|login| login.len()).max().unwrap_or(0);
    let mut output = String::new();
    for (login, activity) in activities {
        let last = activity
            .last_activity
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        let in_repo = activity
            .last_repository_activity
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "{:width$}  last activity: {}  in repository: {}\n",
            login,
            last,
            in_repo,
            width = width
        ));
    }
    output
}
