use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::books::dto::{BookChanges, BookRecord, NewBookRecord};
use crate::books::repository::BookCollection;
use crate::core::library::{ReadingStatus, ShelfError, ShelfResult};
use crate::utils::ddb::{is_conditional_check_failure, opt_string_attribute, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_date};

// status, title and pages collide with DynamoDB reserved words, so every
// attribute goes through an expression attribute name.
const UPDATED_FIELDS: [&str; 7] = ["title", "author", "start_date", "end_date", "image_url", "status", "pages"];

#[derive(Debug)]
pub struct DDBBookCollection {
    client: Client,
    table_name: String,
}

impl DDBBookCollection {
    pub fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl BookCollection for DDBBookCollection {
    async fn insert(&self, record: &NewBookRecord) -> ShelfResult<BookRecord> {
        let table_name: &str = self.table_name.as_ref();
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let item = insert_item(record, id.as_str(), &now)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(#id)")
            .expression_attribute_names("#id", "id")
            .set_item(Some(item))
            .send()
            .await.map_err(|err| {
            if is_conditional_check_failure(&err) {
                ShelfError::duplicate_key(format!("book already exists for {}", id).as_str())
            } else {
                ShelfError::from(err)
            }
        })?;
        tracing::debug!(table = table_name, id = id.as_str(), "put book");
        Ok(BookRecord {
            id,
            title: record.title.clone(),
            author: record.author.clone(),
            start_date: record.start_date,
            end_date: record.end_date,
            creation_date: Some(now),
            image_url: record.image_url.clone(),
            status: record.status.clone(),
            pages: record.pages,
        })
    }

    async fn update(&self, id: &str, changes: &BookChanges) -> ShelfResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .update_item()
            .table_name(table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .update_expression(update_expression())
            .condition_expression("attribute_exists(#id)")
            .set_expression_attribute_names(Some(update_attribute_names()))
            .set_expression_attribute_values(Some(update_attribute_values(changes)))
            .send()
            .await.map(|_| 1).map_err(|err| {
            if is_conditional_check_failure(&err) {
                ShelfError::not_found(format!("book not found for {}", id).as_str())
            } else {
                ShelfError::from(err)
            }
        })
    }

    async fn delete(&self, id: &str) -> ShelfResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await.map(|res| res.attributes().map_or(0, |_| 1)).map_err(ShelfError::from)
    }

    async fn find_all(&self) -> ShelfResult<Vec<BookRecord>> {
        let table_name: &str = self.table_name.as_ref();
        let mut records = vec![];
        let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let res = self.client
                .scan()
                .table_name(table_name)
                .consistent_read(false)
                .set_exclusive_start_key(exclusive_start_key.take())
                .send()
                .await.map_err(ShelfError::from)?;
            records.extend(res.items().unwrap_or_default().iter().map(map_to_book));
            match res.last_evaluated_key() {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key.clone()),
                _ => break,
            }
        }
        tracing::debug!(table = table_name, count = records.len(), "scanned books");
        Ok(records)
    }
}

// the stored item: the insert payload plus the store-assigned id and creation date
fn insert_item(record: &NewBookRecord, id: &str, now: &DateTime<Utc>) -> ShelfResult<HashMap<String, AttributeValue>> {
    let mut item = parse_item(serde_json::to_value(record)?)?;
    item.insert("id".to_string(), AttributeValue::S(id.to_string()));
    item.insert("creation_date".to_string(), string_date(now));
    Ok(item)
}

fn update_expression() -> String {
    let set_expr = UPDATED_FIELDS.iter()
        .map(|f| format!("#{} = :{}", f, f))
        .collect::<Vec<String>>()
        .join(", ");
    format!("SET {}", set_expr)
}

fn update_attribute_names() -> HashMap<String, String> {
    let mut names = HashMap::from([("#id".to_string(), "id".to_string())]);
    for field in UPDATED_FIELDS {
        names.insert(format!("#{}", field), field.to_string());
    }
    names
}

fn update_attribute_values(changes: &BookChanges) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (":title".to_string(), AttributeValue::S(changes.title.to_string())),
        (":author".to_string(), AttributeValue::S(changes.author.to_string())),
        (":start_date".to_string(), opt_string_attribute(changes.start_date.as_deref())),
        (":end_date".to_string(), opt_string_attribute(changes.end_date.as_deref())),
        (":image_url".to_string(), opt_string_attribute(changes.image_url.as_deref())),
        (":status".to_string(), AttributeValue::S(changes.status.to_string())),
        (":pages".to_string(), AttributeValue::N(changes.pages.to_string())),
    ])
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookRecord {
    BookRecord {
        id: parse_string_attribute("id", map).unwrap_or_default(),
        title: parse_string_attribute("title", map).unwrap_or_default(),
        author: parse_string_attribute("author", map).unwrap_or_default(),
        start_date: parse_date_attribute("start_date", map),
        end_date: parse_date_attribute("end_date", map),
        creation_date: parse_date_attribute("creation_date", map),
        image_url: parse_string_attribute("image_url", map),
        status: ReadingStatus::from(parse_string_attribute("status", map).unwrap_or_default()),
        pages: parse_number_attribute("pages", map),
    }
}
