use super::IUserRepo;
use crate::repos::shared::{
    mongo_repo::{self, with_timeout, MongoDocument},
    query_structs::{UpdateResult, UserFindQuery},
};
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::FindOptions,
    Collection, Database,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use user_service_domain::{User, ID};

pub struct MongoUserRepo {
    collection: Collection<Document>,
    timeout: Duration,
}

impl MongoUserRepo {
    pub fn new(db: &Database, collection: &str, timeout: Duration) -> Self {
        Self {
            collection: db.collection(collection),
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for MongoUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        with_timeout(
            self.timeout,
            mongo_repo::insert::<_, UserMongo>(&self.collection, user),
        )
        .await
    }

    async fn save(&self, user: &User) -> anyhow::Result<UpdateResult> {
        let update = doc! {
            "$set": {
                "name": user.name.clone(),
                "age": i64::from(user.age),
            }
        };
        with_timeout(
            self.timeout,
            mongo_repo::update_one(&self.collection, user.id.inner_ref(), update),
        )
        .await
    }

    async fn delete(&self, user_id: &ID) -> anyhow::Result<Option<User>> {
        with_timeout(
            self.timeout,
            mongo_repo::delete::<_, UserMongo>(&self.collection, user_id.inner_ref()),
        )
        .await
    }

    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>> {
        with_timeout(
            self.timeout,
            mongo_repo::find::<_, UserMongo>(&self.collection, user_id.inner_ref()),
        )
        .await
    }

    async fn find_many(&self, query: &UserFindQuery) -> anyhow::Result<Vec<User>> {
        let filter = to_filter(query);
        let options = to_find_options(query);
        with_timeout(
            self.timeout,
            mongo_repo::find_many_by::<_, UserMongo>(&self.collection, filter, options),
        )
        .await
    }
}

/// Numeric view of the stored `age`, matching `age_from_bson`: string ages
/// are converted and anything unconvertible or missing counts as `0`.
fn age_expr() -> Bson {
    Bson::Document(doc! {
        "$convert": {
            "input": "$age",
            "to": "long",
            "onError": 0_i64,
            "onNull": 0_i64
        }
    })
}

/// `name` becomes a case insensitive regex on the escaped value so that it
/// matches literally. Age bounds compare numerically through `$expr`, which
/// also covers documents holding the age as a string.
fn to_filter(query: &UserFindQuery) -> Document {
    let mut filter = doc! {};
    if let Some(name) = &query.name {
        filter.insert(
            "name",
            doc! {
                "$regex": regex::escape(name),
                "$options": "i"
            },
        );
    }

    let mut age_bounds = vec![];
    if let Some(min_age) = query.min_age {
        age_bounds.push(doc! { "$gte": [age_expr(), i64::from(min_age)] });
    }
    if let Some(max_age) = query.max_age {
        age_bounds.push(doc! { "$lte": [age_expr(), i64::from(max_age)] });
    }
    if !age_bounds.is_empty() {
        filter.insert("$expr", doc! { "$and": age_bounds });
    }

    filter
}

fn to_find_options(query: &UserFindQuery) -> FindOptions {
    let mut find_options = FindOptions::builder().build();
    // The server rejects values that do not fit in an int64
    let skip = i64::try_from(query.skip).unwrap_or(i64::MAX);
    find_options.skip = Some(skip as u64);
    find_options.limit = Some(i64::try_from(query.limit).unwrap_or(i64::MAX));
    // ObjectIds generated by the service grow with creation time
    find_options.sort = Some(doc! { "_id": 1 });
    find_options
}

#[derive(Debug, Serialize, Deserialize)]
struct UserMongo {
    _id: ObjectId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    age: Bson,
}

/// Documents written by older versions of the service hold the age as a
/// string, those are still readable. Keep in line with `age_expr`.
fn age_from_bson(age: &Bson) -> u32 {
    let age = match age {
        Bson::Int32(age) => i64::from(*age),
        Bson::Int64(age) => *age,
        Bson::Double(age) => *age as i64,
        Bson::String(age) => age.parse::<i64>().unwrap_or_default(),
        _ => 0,
    };
    if age < 0 {
        0
    } else {
        u32::try_from(age).unwrap_or(u32::MAX)
    }
}

impl MongoDocument<User> for UserMongo {
    fn to_domain(self) -> User {
        User {
            id: ID::from(self._id),
            age: age_from_bson(&self.age),
            name: self.name,
        }
    }

    fn from_domain(user: &User) -> Self {
        Self {
            _id: *user.id.inner_ref(),
            name: user.name.clone(),
            age: Bson::Int64(i64::from(user.age)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_query_gives_empty_filter() {
        let query = UserFindQuery::default();
        assert_eq!(to_filter(&query), doc! {});

        let options = to_find_options(&query);
        assert_eq!(options.skip, Some(0));
        assert_eq!(options.limit, Some(10));
        assert_eq!(options.sort, Some(doc! { "_id": 1 }));
    }

    #[test]
    fn it_translates_name_filter_to_escaped_regex() {
        let query = UserFindQuery {
            name: Some("vic.*".into()),
            ..Default::default()
        };
        assert_eq!(
            to_filter(&query),
            doc! {
                "name": { "$regex": "vic\\.\\*", "$options": "i" }
            }
        );
    }

    #[test]
    fn it_translates_age_bounds() {
        let query = UserFindQuery {
            min_age: Some(18),
            ..Default::default()
        };
        assert_eq!(
            to_filter(&query),
            doc! { "$expr": { "$and": [{ "$gte": [age_expr(), 18_i64] }] } }
        );

        let query = UserFindQuery {
            name: Some("a".into()),
            min_age: Some(18),
            max_age: Some(65),
            skip: 20,
            limit: 10,
        };
        assert_eq!(
            to_filter(&query),
            doc! {
                "name": { "$regex": "a", "$options": "i" },
                "$expr": {
                    "$and": [
                        { "$gte": [age_expr(), 18_i64] },
                        { "$lte": [age_expr(), 65_i64] }
                    ]
                }
            }
        );
        assert_eq!(to_find_options(&query).skip, Some(20));

        let query = UserFindQuery {
            skip: usize::MAX,
            ..Default::default()
        };
        assert_eq!(to_find_options(&query).skip, Some(i64::MAX as u64));
    }

    #[test]
    fn it_maps_documents_both_ways() {
        let user = User::new("Victor", 21);
        let raw = UserMongo::from_domain(&user);
        assert_eq!(raw.age, Bson::Int64(21));
        assert_eq!(raw.to_domain(), user);
    }

    #[test]
    fn it_reads_legacy_string_ages() {
        assert_eq!(age_from_bson(&Bson::String("21".into())), 21);
        assert_eq!(age_from_bson(&Bson::String("old".into())), 0);
        assert_eq!(age_from_bson(&Bson::Int32(45)), 45);
        assert_eq!(age_from_bson(&Bson::Int64(-1)), 0);
        assert_eq!(age_from_bson(&Bson::Null), 0);
    }

    #[test]
    fn age_bounds_apply_to_string_ages_too() {
        let query = UserFindQuery {
            min_age: Some(18),
            ..Default::default()
        };
        let filter = to_filter(&query);
        // A plain field comparison would never match `"age": "21"`
        assert!(!filter.contains_key("age"));

        let bound = filter
            .get_document("$expr")
            .unwrap()
            .get_array("$and")
            .unwrap()[0]
            .as_document()
            .unwrap()
            .get_array("$gte")
            .unwrap()
            .clone();
        let convert = bound[0]
            .as_document()
            .unwrap()
            .get_document("$convert")
            .unwrap();
        assert_eq!(convert.get_str("input").unwrap(), "$age");
        assert_eq!(convert.get_str("to").unwrap(), "long");
        // Unconvertible and missing ages fall back to what `age_from_bson` reads
        let unreadable = age_from_bson(&Bson::String("old".into()));
        assert_eq!(convert.get_i64("onError").unwrap(), i64::from(unreadable));
        let missing = age_from_bson(&Bson::Null);
        assert_eq!(convert.get_i64("onNull").unwrap(), i64::from(missing));
        assert_eq!(bound[1], Bson::Int64(18));
    }
}
